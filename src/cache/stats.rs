//! Cache Statistics Module
//!
//! Tracks lookups served from memory and populations triggered by misses.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered by an existing entry (positive or negative)
    pub hits: u64,
    /// Lookups that ran the loader
    pub misses: u64,
    /// Negative entries stored
    pub not_found: u64,
    /// Loads that failed and left the slot empty
    pub load_failures: u64,
    /// Current number of populated entries
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
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

    pub fn record_not_found(&mut self) {
        self.not_found += 1;
    }

    pub fn record_load_failure(&mut self) {
        self.load_failures += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
