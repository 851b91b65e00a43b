//! Cache Statistics Module
//!
//! Counts how each cache lookup was served: from the store, by a first fetch,
//! or by refreshing a stale record.

use serde::Serialize;

// == Cache Stats ==
/// Lookup counters for one cache tier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a fresh stored record
    pub hits: u64,
    /// Lookups with no stored record, answered by fetching upstream
    pub misses: u64,
    /// Lookups that found a stale record and re-fetched it
    pub refreshes: u64,
    /// Lookups that failed while talking to the provider
    pub upstream_errors: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of lookups served without an upstream call.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.refreshes;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Number of lookups that reached the provider, successful or not.
    pub fn upstream_calls(&self) -> u64 {
        self.misses + self.refreshes
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn record_upstream_error(&mut self) {
        self.upstream_errors += 1;
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
        assert_eq!(stats.refreshes, 0);
        assert_eq!(stats.upstream_errors, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_refresh();
        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(stats.upstream_calls(), 2);
    }

    #[test]
    fn test_upstream_errors_do_not_affect_hit_rate() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_upstream_error();
        assert_eq!(stats.hit_rate(), 1.0);
        assert_eq!(stats.upstream_errors, 1);
    }
}
