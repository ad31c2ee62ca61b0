//! Core utilities for the SportIntel toolkit
//!
//! Cross-cutting pieces used by every provider and service:
//! - `cache`: TTL-bounded LRU cache and the clock it ages entries with
//! - `config`: environment-driven configuration
//! - `http`: header builders and the shared JSON GET helper
//! - `logging`: tracing subscriber setup
//! - `rate_limit`: fixed-window request quota

pub mod cache;
pub mod config;
pub mod http;
pub mod logging;
pub mod rate_limit;

pub use cache::{CacheEntry, CacheKey, Clock, SalaryCacheKey, SystemClock, TtlCache};
pub use config::{Config, ProviderConfig, SalaryServiceConfig};
pub use rate_limit::{RateLimitStatus, RateLimiter};
