//! Cache Entry Module
//!
//! Defines a single cached answer together with its access metadata.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::cache::Fingerprint;

// == Cache Entry ==
/// Represents a single cached answer with access metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Fingerprint of the question this entry answers
    pub key: Fingerprint,
    /// The cached computed answer
    pub answer: String,
    /// Ground-truth answer supplied at insertion, never mutated
    pub reference: String,
    /// Wall-clock insertion time
    pub created_at: DateTime<Utc>,
    /// Monotonic insertion instant, used for age
    pub inserted: Instant,
    /// Number of hits plus duplicate insertions, starting at 1
    pub access_count: u64,
    /// Time of the most recent hit or duplicate insertion
    pub last_accessed_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry with an access count of 1.
    pub fn new(key: Fingerprint, answer: String, reference: String) -> Self {
        let now = Utc::now();
        Self {
            key,
            answer,
            reference,
            created_at: now,
            inserted: Instant::now(),
            access_count: 1,
            last_accessed_at: now,
        }
    }

    // == Touch ==
    /// Records an access: bumps the count and refreshes `last_accessed_at`.
    pub fn touch(&mut self) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_accessed_at = Utc::now();
    }

    // == Age ==
    /// Time elapsed since insertion.
    pub fn age(&self) -> Duration {
        self.inserted.elapsed()
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl`.
    ///
    /// The comparison is strict: an entry whose age equals the TTL is still
    /// live. With a zero TTL any positive age expires the entry.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}
