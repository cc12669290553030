//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: Drops expired cache entries ahead of their next read

mod sweep;

pub use sweep::spawn_expiry_sweep;
