//! QA Cache - memoization server for question answering
//!
//! Answers semantically identical questions once and serves repeats from an
//! in-memory cache with LRU, LFU or FIFO eviction and TTL expiry.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_expiry_sweep;
