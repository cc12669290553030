//! Recency Order Module
//!
//! Ordered sequence of fingerprints consumed by the LRU and FIFO policies.

use std::collections::VecDeque;

use crate::cache::Fingerprint;

// == Recency Order ==
/// Tracks insertion order, optionally refreshed on access.
///
/// Keys are stored in a VecDeque where:
/// - Front = oldest (next victim for LRU and FIFO)
/// - Back = newest
#[derive(Debug, Default)]
pub struct RecencyOrder {
    order: VecDeque<Fingerprint>,
}

impl RecencyOrder {
    // == Constructor ==
    /// Creates a new empty order.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push Back ==
    /// Appends a newly inserted key at the back.
    pub fn push_back(&mut self, key: Fingerprint) {
        self.order.push_back(key);
    }

    // == Move To Back ==
    /// Moves an existing key to the back. Unknown keys are ignored.
    pub fn move_to_back(&mut self, key: &Fingerprint) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    // == Remove ==
    /// Removes a key from the order.
    pub fn remove(&mut self, key: &Fingerprint) {
        self.order.retain(|k| k != key);
    }

    // == Front ==
    /// Returns the oldest key without removing it.
    pub fn front(&self) -> Option<&Fingerprint> {
        self.order.front()
    }

    // == Iter ==
    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &Fingerprint) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
