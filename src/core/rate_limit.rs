//! Rolling request quota shared by every provider client.
//!
//! A limiter never blocks or queues: when the quota is spent it fails with
//! [`SportIntelError::RateLimitExceeded`] and the caller decides whether to fall
//! back to another source.

use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::{Result, SportIntelError};

/// Counter plus the start of the window it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitState {
    pub count: u32,
    pub window_start: Instant,
}

/// Snapshot reported by provider status endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitStatus {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

pub struct RateLimiter {
    provider: String,
    limit: u32,
    window: Duration,
    state: Mutex<RateLimitState>,
}

impl RateLimiter {
    pub fn new(provider: impl Into<String>, limit: u32, window: Duration) -> Self {
        Self {
            provider: provider.into(),
            limit,
            window,
            state: Mutex::new(RateLimitState {
                count: 0,
                window_start: Instant::now(),
            }),
        }
    }

    /// Quota measured over a 60 second window.
    pub fn per_minute(provider: impl Into<String>, limit: u32) -> Self {
        Self::new(provider, limit, Duration::from_secs(60))
    }

    /// Quota measured over a one hour window.
    pub fn per_hour(provider: impl Into<String>, limit: u32) -> Self {
        Self::new(provider, limit, Duration::from_secs(3600))
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Reserve one request slot. Call this before dispatching the request so
    /// that a failed network call still consumes quota.
    pub fn try_acquire(&self) -> Result<()> {
        self.try_acquire_at(Instant::now())
    }

    pub fn try_acquire_at(&self, now: Instant) -> Result<()> {
        let mut state = self.lock();
        self.roll_window(&mut state, now);

        if state.count >= self.limit {
            warn!(
                provider = %self.provider,
                used = state.count,
                limit = self.limit,
                "rate limit reached"
            );
            return Err(SportIntelError::RateLimitExceeded {
                provider: self.provider.clone(),
                used: state.count,
                limit: self.limit,
            });
        }

        state.count += 1;
        Ok(())
    }

    pub fn status(&self) -> RateLimitStatus {
        self.status_at(Instant::now())
    }

    pub fn status_at(&self, now: Instant) -> RateLimitStatus {
        let mut state = self.lock();
        self.roll_window(&mut state, now);
        RateLimitStatus {
            used: state.count,
            limit: self.limit,
            remaining: self.limit.saturating_sub(state.count),
        }
    }

    fn roll_window(&self, state: &mut RateLimitState, now: Instant) {
        if now.saturating_duration_since(state.window_start) > self.window {
            if state.count > 0 {
                debug!(provider = %self.provider, "rate limit window reset");
            }
            state.count = 0;
            state.window_start = now;
        }
    }

    fn lock(&self) -> MutexGuard<'_, RateLimitState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
