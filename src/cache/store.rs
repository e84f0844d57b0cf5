//! Cache Store Module
//!
//! Single-threaded cache engine: HashMap storage, lazy TTL expiration,
//! optional LRU capacity bound and traffic counters. Wrapped by
//! [`PerformanceCache`](crate::cache::PerformanceCache) for shared use.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{
    CacheEntry, CacheStats, Clock, KeyPattern, LruTracker, SystemClock, MAX_KEY_LENGTH,
};
use crate::config::CacheConfig;

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency order, consulted only when bounded
    lru: LruTracker,
    stats: CacheStats,
    /// None = unbounded
    max_entries: Option<usize>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a store on the wall clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a store reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: config.max_entries,
            default_ttl: config.default_ttl,
            clock,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // == Get ==
    /// Returns a copy of the live value under `key`.
    ///
    /// An expired entry is dropped on the spot and counts as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.now_ms();
        let lookup = self
            .entries
            .get(key)
            .map(|entry| (!entry.is_expired(now)).then(|| entry.value.clone()));

        match lookup {
            Some(Some(value)) => {
                self.stats.record_hit();
                self.lru.touch(key);
                Some(value)
            }
            Some(None) => {
                self.remove_entry(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                debug!(key, "cache miss (expired)");
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl` (or the default TTL).
    ///
    /// Overwrites unconditionally and resets the TTL. A zero TTL stores an
    /// entry that is already expired. Returns false only when the key is
    /// rejected.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> bool {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            warn!(
                key_len = key.len(),
                max = MAX_KEY_LENGTH,
                "rejecting cache key: must be 1..={} bytes",
                MAX_KEY_LENGTH
            );
            return false;
        }

        let now = self.now_ms();

        if !self.entries.contains_key(&key) {
            self.make_room(now);
        }

        let entry = CacheEntry::new(value, now, ttl.unwrap_or(self.default_ttl));
        self.lru.touch(&key);
        self.entries.insert(key, entry);
        self.stats.record_set();

        true
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was there.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.remove_entry(key) {
            self.stats.record_deletes(1);
            true
        } else {
            false
        }
    }

    // == Clear Pattern ==
    /// Removes every key matching `pattern` and returns how many went.
    pub fn clear_pattern(&mut self, pattern: &KeyPattern) -> usize {
        let matched: Vec<String> = self
            .entries
            .keys()
            .filter(|key| pattern.matches(key))
            .cloned()
            .collect();

        for key in &matched {
            self.remove_entry(key);
        }

        self.stats.record_deletes(matched.len());
        matched.len()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.now_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Stats ==
    /// Counter snapshot; `current_size` counts live entries only.
    pub fn stats(&self) -> CacheStats {
        let now = self.now_ms();
        let live = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count();

        self.stats.snapshot(live)
    }

    /// Stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }

    /// Frees one slot for a new key when the store is at capacity.
    fn make_room(&mut self, now: u64) {
        let Some(max) = self.max_entries else {
            return;
        };

        if self.entries.len() < max {
            return;
        }

        // Expired entries go before any live one is sacrificed
        if self.purge_expired() > 0 && self.entries.len() < max {
            return;
        }

        while self.entries.len() >= max {
            let Some(victim) = self.lru.evict_oldest() else {
                break;
            };
            if self.entries.remove(&victim).is_some() {
                self.stats.record_eviction();
                debug!(key = %victim, now, "evicted least recently used entry");
            }
        }
    }
}
