//! Cache Module
//!
//! In-memory answer cache with fingerprint keys, LRU/LFU/FIFO eviction and
//! lazy TTL expiry.

mod entry;
mod inflight;
mod key;
mod order;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use inflight::{InflightGuard, InflightLocks};
pub use key::{derive_key, Fingerprint, FINGERPRINT_LEN};
pub use order::RecencyOrder;
pub use policy::EvictionPolicy;
pub use stats::CacheStats;
pub use store::{CacheStore, CachedAnswer, Lookup};
