//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /query` - Answer a question, from cache when possible
//! - `GET /stats` - Get cache statistics
//! - `POST /clear` - Empty the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
