//! Cache Statistics Module
//!
//! Tracks response-cache performance: hits, misses and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Counters for the response cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups served from a valid entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries evicted by the size bound
    pub evictions: u64,
    /// Current number of entries
    pub total_entries: usize,
}

impl CacheStats {
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit rate over all lookups, 0.0 when none have happened.
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

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
