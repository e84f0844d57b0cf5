//! Cache Statistics Module
//!
//! Lifetime counters for cache traffic, reset only when the store is rebuilt.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache performance counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Successful writes
    pub sets: u64,
    /// Entries removed by `delete` or pattern invalidation
    pub deletes: u64,
    /// Entries dropped to respect the capacity bound
    pub evictions: u64,
    /// Expired entries removed lazily or by the sweep
    pub expirations: u64,
    /// Live entries at snapshot time
    pub current_size: usize,
    /// hits / (hits + misses), 0.0 before any lookup
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_deletes(&mut self, count: usize) {
        self.deletes += count as u64;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Snapshot ==
    /// Copies the counters and fills in the derived fields.
    pub fn snapshot(&self, current_size: usize) -> Self {
        Self {
            current_size,
            hit_rate: self.hit_rate(),
            ..self.clone()
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.sets, 0);
        assert_eq!(stats.deletes, 0);
        assert_eq!(stats.current_size, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
        assert!(!stats.hit_rate().is_nan());
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_bulk_counters() {
        let mut stats = CacheStats::new();
        stats.record_deletes(3);
        stats.record_deletes(0);
        stats.record_expirations(2);
        stats.record_eviction();
        stats.record_set();

        assert_eq!(stats.deletes, 3);
        assert_eq!(stats.expirations, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.sets, 1);
    }

    #[test]
    fn test_snapshot_fills_derived_fields() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();

        let snapshot = stats.snapshot(7);
        assert_eq!(snapshot.current_size, 7);
        assert_eq!(snapshot.hit_rate, 0.5);
        assert_eq!(snapshot.hits, 1);
    }
}
