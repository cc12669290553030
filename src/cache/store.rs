//! Cache Store Module
//!
//! Main cache engine combining HashMap storage, a recency order, a pluggable
//! eviction policy and lazy TTL expiry.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::{
    derive_key, CacheEntry, CacheStats, EvictionPolicy, Fingerprint, RecencyOrder,
};
use crate::error::{CacheError, Result};

// == Lookup Result ==
/// A cached answer returned on a hit.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedAnswer {
    pub answer: String,
    pub reference: String,
    /// Access count after this hit was recorded
    pub access_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Outcome of [`CacheStore::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Hit(CachedAnswer),
    Miss,
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

// == Cache Store ==
/// Bounded answer cache with policy-driven eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Fingerprint to entry storage
    entries: HashMap<Fingerprint, CacheEntry>,
    /// Insertion order, refreshed on hit under LRU
    order: RecencyOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    policy: EvictionPolicy,
    /// Maximum entry age before a read treats it as expired
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be positive
    /// * `policy` - Eviction policy used when the store is full
    /// * `ttl` - Maximum entry age; zero expires entries on their next read
    pub fn new(capacity: usize, policy: EvictionPolicy, ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::Configuration(
                "cache capacity must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            order: RecencyOrder::new(),
            stats: CacheStats::new(),
            capacity,
            policy,
            ttl,
        })
    }

    // == Get ==
    /// Looks up the answer for a question.
    ///
    /// Expired entries are removed and reported as misses. Every call counts
    /// as exactly one query and exactly one hit or miss.
    pub fn get(&mut self, title: &str, content: &str) -> Lookup {
        let key = derive_key(title, content);
        self.get_by_key(&key)
    }

    /// Same as [`CacheStore::get`] for an already derived fingerprint.
    pub fn get_by_key(&mut self, key: &Fingerprint) -> Lookup {
        let ttl = self.ttl;
        let live = match self.entries.get_mut(key) {
            None => {
                debug!(key = %key.short(), "cache miss");
                self.stats.record_miss();
                return Lookup::Miss;
            }
            Some(entry) if entry.is_expired(ttl) => None,
            Some(entry) => {
                entry.touch();
                Some(CachedAnswer {
                    answer: entry.answer.clone(),
                    reference: entry.reference.clone(),
                    access_count: entry.access_count,
                    created_at: entry.created_at,
                })
            }
        };

        let Some(hit) = live else {
            self.remove(key);
            debug!(key = %key.short(), "cache entry expired");
            self.stats.record_miss();
            return Lookup::Miss;
        };

        if self.policy.refreshes_on_hit() {
            self.order.move_to_back(key);
        }
        self.stats.record_hit();
        debug!(key = %key.short(), access_count = hit.access_count, "cache hit");

        Lookup::Hit(hit)
    }

    // == Put ==
    /// Memoizes an answer for a question.
    ///
    /// If the question is already cached only its access metadata is
    /// refreshed; the first stored answer and reference are kept. If the
    /// store is full, one entry is evicted according to the policy first.
    pub fn put(&mut self, title: &str, content: &str, answer: String, reference: String) {
        let key = derive_key(title, content);
        self.put_by_key(key, answer, reference);
    }

    /// Same as [`CacheStore::put`] for an already derived fingerprint.
    pub fn put_by_key(&mut self, key: Fingerprint, answer: String, reference: String) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.touch();
            debug!(key = %key.short(), access_count = entry.access_count, "duplicate put absorbed");
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_one();
        }

        self.order.push_back(key.clone());
        self.entries
            .insert(key.clone(), CacheEntry::new(key, answer, reference));
    }

    // == Evict ==
    /// Removes the policy's victim, if any.
    fn evict_one(&mut self) {
        if let Some(victim) = self.policy.select_victim(&self.entries, &self.order) {
            self.remove(&victim);
            self.stats.record_eviction();
            info!(key = %victim.short(), policy = %self.policy, "evicted cache entry");
        }
    }

    fn remove(&mut self, key: &Fingerprint) {
        self.entries.remove(key);
        self.order.remove(key);
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were dropped.
    ///
    /// Used by the optional background sweep; it touches neither the miss
    /// nor the eviction counters.
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let expired: Vec<Fingerprint> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }

        expired.len()
    }

    // == Clear ==
    /// Empties the store and zeroes the statistics. Configuration is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.reset();
    }

    // == Stats ==
    /// Returns a snapshot of the statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    // == Size ==
    /// Returns the current number of entries in the cache.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Access count of a live entry, without recording a lookup.
    pub fn access_count(&self, title: &str, content: &str) -> Option<u64> {
        self.entries
            .get(&derive_key(title, content))
            .map(|entry| entry.access_count)
    }

    /// Whether every entry appears exactly once in the recency order.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.order.len() == self.entries.len()
            && self.entries.keys().all(|key| self.order.contains(key))
    }
}
