//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Counters owned by a single [`crate::cache::CacheStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a cached answer
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Lookups overall; always `hits + misses`
    pub total_queries: u64,
    /// Entries removed to make room for new ones
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / total_queries, or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.total_queries == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_queries as f64
        }
    }

    // == Miss Rate ==
    /// Returns misses / total_queries, or 0.0 if no lookups have been made.
    pub fn miss_rate(&self) -> f64 {
        if self.total_queries == 0 {
            0.0
        } else {
            self.misses as f64 / self.total_queries as f64
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
        self.total_queries += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.total_queries += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
