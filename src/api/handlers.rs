//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{ClearResponse, HealthResponse, QueryRequest, QueryResponse, StatsResponse};
use crate::services::{
    AnswerGenerator, HttpAnswerGenerator, HttpScorer, MemoryResultStore, QueryService,
    ResultStore, ScoreMethod, Scorer,
};

/// Application state shared across all handlers.
///
/// The cache store is wrapped in Arc<RwLock<>>; every mutating cache call is
/// one write-locked critical section.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
    /// Hit/miss orchestration over the same store
    pub service: Arc<QueryService>,
}

impl AppState {
    /// Creates a new AppState around a cache store and its collaborators.
    pub fn new(
        cache: CacheStore,
        generator: Arc<dyn AnswerGenerator>,
        scorer: Arc<dyn Scorer>,
        results: Arc<dyn ResultStore>,
        score_method: ScoreMethod,
    ) -> Self {
        let cache = Arc::new(RwLock::new(cache));
        let service = QueryService::new(cache.clone(), generator, scorer, results, score_method);
        Self {
            cache,
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache store and HTTP clients for the generator and scorer;
    /// answered questions are recorded in memory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.cache_size, config.cache_policy, config.ttl())?;
        let generator = HttpAnswerGenerator::new(config.llm_service_url.clone())?;
        let scorer = HttpScorer::new(config.score_service_url.clone())?;

        Ok(Self::new(
            cache,
            Arc::new(generator),
            Arc::new(scorer),
            Arc::new(MemoryResultStore::new()),
            config.score_method,
        ))
    }
}

/// Handler for GET /query
///
/// Answers a question from the cache or, on a miss, from the generator.
pub async fn query_handler(
    State(state): State<AppState>,
    Query(req): Query<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let outcome = state.service.handle(&req).await?;
    Ok(Json(outcome.into()))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let cache = state.cache.read().await;

    Json(StatsResponse::new(
        cache.stats(),
        cache.size(),
        cache.capacity(),
        cache.policy(),
        cache.ttl().as_secs(),
    ))
}

/// Handler for POST /clear
///
/// Empties the cache and resets its statistics.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.write().await.clear();
    info!("Cache cleared");

    Json(ClearResponse::cleared())
}

/// Handler for GET /health
///
/// Returns health status together with a summary of the cache.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.cache.read().await;

    Json(HealthResponse::ok(
        cache.size(),
        cache.capacity(),
        cache.policy(),
        cache.stats(),
    ))
}
