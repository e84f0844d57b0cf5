//! Shared Cache Module
//!
//! [`PerformanceCache`] is the thread-safe handle application code talks to.
//! One instance is built at startup, wrapped in an `Arc` and handed to every
//! component that needs it.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore, Clock, KeyPattern};
use crate::config::CacheConfig;

// == Performance Cache ==
/// Thread-safe key/value cache with per-entry TTL, glob invalidation and
/// hit/miss statistics.
///
/// All operations hold the internal lock only for in-memory work.
/// Values are cloned out; callers never see a reference into the table.
#[derive(Debug)]
pub struct PerformanceCache<V> {
    store: Mutex<CacheStore<V>>,
}

impl<V: Clone> PerformanceCache<V> {
    // == Constructors ==
    pub fn new(config: CacheConfig) -> Self {
        Self::from_store(CacheStore::new(config))
    }

    /// Builds a cache reading time from `clock`, mostly for tests.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self::from_store(CacheStore::with_clock(config, clock))
    }

    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Builds the process-wide instance ready to be shared.
    pub fn shared(config: CacheConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    // == Get ==
    /// Returns the live value under `key`, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        self.store.lock().get(key)
    }

    /// Returns the live value under `key`, or `default` when absent or expired.
    pub fn get_or(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    // == Set ==
    /// Stores `value` for `ttl`, or for the configured default when `None`.
    ///
    /// A zero TTL stores an entry that is expired immediately. Returns
    /// false when the key is empty or too long.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> bool {
        self.store.lock().set(key.into(), value, ttl)
    }

    // == Remember ==
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// `producer` runs without the lock held, so slow producers do not stall
    /// other cache traffic. Its error is returned untouched and nothing is
    /// stored. Concurrent misses on the same key may each run the producer;
    /// the last write wins.
    pub fn remember<E, F>(&self, key: &str, ttl: Option<Duration>, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        debug!(key, "cache miss, running producer");
        let value = producer()?;

        if !self.set(key, value.clone(), ttl) {
            debug!(key, "produced value not cached");
        }

        Ok(value)
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.store.lock().delete(key)
    }

    // == Clear Pattern ==
    /// Removes every key matching the glob `pattern` and returns the count.
    ///
    /// A malformed pattern removes nothing.
    pub fn clear_pattern(&self, pattern: &str) -> usize {
        match KeyPattern::parse(pattern) {
            Ok(parsed) => self.clear_matching(&parsed),
            Err(err) => {
                warn!(error = %err, "ignoring cache invalidation");
                0
            }
        }
    }

    /// Same as [`clear_pattern`](Self::clear_pattern) with a pre-parsed pattern.
    pub fn clear_matching(&self, pattern: &KeyPattern) -> usize {
        let removed = self.store.lock().clear_pattern(pattern);
        debug!(pattern = %pattern, removed, "cleared cache keys");
        removed
    }

    // == Purge ==
    /// Drops every expired entry. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        self.store.lock().purge_expired()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}
