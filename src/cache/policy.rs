//! Eviction Policy Module
//!
//! Closed set of strategies that pick which entry to drop when the store is full.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::{CacheEntry, Fingerprint, RecencyOrder};
use crate::error::CacheError;

// == Eviction Policy ==
/// Victim selection strategy, fixed when the store is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionPolicy {
    /// Least recently used: hits move the key to the back of the order
    Lru,
    /// Least frequently used: lowest access count loses
    Lfu,
    /// First in, first out: hits never reorder
    Fifo,
}

impl EvictionPolicy {
    // == Select Victim ==
    /// Picks the key to evict, or `None` when the store is empty.
    ///
    /// LFU ties go to the entry inserted earliest, since candidates are
    /// scanned in recency order and only a strictly smaller count replaces
    /// the current minimum.
    pub fn select_victim(
        &self,
        entries: &HashMap<Fingerprint, CacheEntry>,
        order: &RecencyOrder,
    ) -> Option<Fingerprint> {
        match self {
            EvictionPolicy::Lru | EvictionPolicy::Fifo => order.front().cloned(),
            EvictionPolicy::Lfu => {
                let mut victim: Option<(&Fingerprint, u64)> = None;
                for key in order.iter() {
                    let Some(entry) = entries.get(key) else {
                        continue;
                    };
                    match victim {
                        Some((_, min)) if entry.access_count >= min => {}
                        _ => victim = Some((key, entry.access_count)),
                    }
                }
                victim.map(|(key, _)| key.clone())
            }
        }
    }

    // == Refreshes On Hit ==
    /// Whether a successful lookup moves the key to the back of the order.
    pub fn refreshes_on_hit(&self) -> bool {
        matches!(self, EvictionPolicy::Lru)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Lfu => "LFU",
            EvictionPolicy::Fifo => "FIFO",
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LRU" => Ok(EvictionPolicy::Lru),
            "LFU" => Ok(EvictionPolicy::Lfu),
            "FIFO" => Ok(EvictionPolicy::Fifo),
            other => Err(CacheError::Configuration(format!(
                "unknown eviction policy '{}', expected one of LRU, LFU, FIFO",
                other
            ))),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
