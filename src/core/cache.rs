//! In-memory TTL cache used by the resolution layer.
//!
//! Entries live in an LRU table and carry the time they were stored plus the
//! name of the provider that produced them. Expiry is lazy: an entry older
//! than the TTL is dropped on the lookup that finds it, there is no sweeper.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use lru::LruCache;
use std::{
    hash::Hash,
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::debug;

use crate::cli::types::{SlateType, Site, Sport};

/// Source of "now" for anything that ages data.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Generic cache key with a stable string form for logs and status output.
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    fn cache_key(&self) -> String;
}

/// Key for resolved salary sets: one entry per sport, site, slate and day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SalaryCacheKey {
    pub sport: Sport,
    pub site: Site,
    pub slate_type: SlateType,
    pub day: NaiveDate,
}

impl CacheKey for SalaryCacheKey {
    fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.sport,
            self.site,
            self.slate_type,
            self.day.format("%Y-%m-%d")
        )
    }
}

/// Key for the short-lived player list, one per sport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerListCacheKey {
    pub sport: Sport,
}

impl CacheKey for PlayerListCacheKey {
    fn cache_key(&self) -> String {
        format!("players:{}", self.sport)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub payload: T,
    pub stored_at: DateTime<Utc>,
    /// Provider that produced the payload.
    pub source: String,
}

impl<T> CacheEntry<T> {
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.stored_at
    }
}

pub struct TtlCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    entries: Mutex<LruCache<K, CacheEntry<V>>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity: capacity.get(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return a live entry, evicting it first if it has outlived the TTL.
    pub fn get_at(&self, key: &K, now: DateTime<Utc>) -> Option<CacheEntry<V>> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) => entry.age(now) > self.ttl,
            None => return None,
        };

        if expired {
            entries.pop(key);
            debug!(key = %key.cache_key(), "cache entry expired");
            return None;
        }

        entries.get(key).cloned()
    }

    pub fn put_at(&self, key: K, payload: V, source: impl Into<String>, now: DateTime<Utc>) {
        let entry = CacheEntry {
            payload,
            stored_at: now,
            source: source.into(),
        };
        if let Some((evicted, _)) = self.lock().push(key.clone(), entry) {
            if evicted != key {
                debug!(key = %evicted.cache_key(), "cache entry evicted for capacity");
            }
        }
    }

    pub fn invalidate(&self, key: &K) -> bool {
        self.lock().pop(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Snapshot of every stored entry, most recently used first. Expired
    /// entries are included; callers report their age.
    pub fn entries(&self) -> Vec<(K, CacheEntry<V>)> {
        self.lock()
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }

    /// (entries, capacity)
    pub fn stats(&self) -> (usize, usize) {
        (self.lock().len(), self.capacity)
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
