//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, EvictionPolicy};
use crate::services::QueryOutcome;

/// Response body for `GET /query`
///
/// Hits and misses share the endpoint but not the shape; `status` tells
/// them apart.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryResponse {
    Hit {
        question_id: i64,
        llm_answer: String,
        access_count: u64,
        from_cache: bool,
    },
    Miss {
        question_id: i64,
        llm_answer: String,
        score: f64,
        access_count: u64,
        from_cache: bool,
        cache_size: usize,
    },
}

impl From<QueryOutcome> for QueryResponse {
    fn from(outcome: QueryOutcome) -> Self {
        match outcome {
            QueryOutcome::Hit {
                question_id,
                answer,
                access_count,
            } => QueryResponse::Hit {
                question_id,
                llm_answer: answer,
                access_count,
                from_cache: true,
            },
            QueryOutcome::Miss {
                question_id,
                answer,
                score,
                cache_size,
            } => QueryResponse::Miss {
                question_id,
                llm_answer: answer,
                score,
                access_count: 1,
                from_cache: false,
                cache_size,
            },
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache_size: usize,
    pub max_size: usize,
    pub policy: EvictionPolicy,
    /// TTL in seconds
    pub ttl: u64,
    pub hits: u64,
    pub misses: u64,
    pub total_queries: u64,
    /// Percentage with two decimals, e.g. `"66.67%"`
    pub hit_rate: String,
    pub miss_rate: String,
    pub evictions: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(
        stats: CacheStats,
        cache_size: usize,
        max_size: usize,
        policy: EvictionPolicy,
        ttl: u64,
    ) -> Self {
        Self {
            cache_size,
            max_size,
            policy,
            ttl,
            hits: stats.hits,
            misses: stats.misses,
            total_queries: stats.total_queries,
            hit_rate: format_percent(stats.hit_rate()),
            miss_rate: format_percent(stats.miss_rate()),
            evictions: stats.evictions,
        }
    }
}

fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, always `"ok"` when the server answers
    pub status: String,
    pub cache_size: usize,
    pub max_size: usize,
    pub policy: EvictionPolicy,
    pub stats: CacheStats,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok(cache_size: usize, max_size: usize, policy: EvictionPolicy, stats: CacheStats) -> Self {
        Self {
            status: "ok".to_string(),
            cache_size,
            max_size,
            policy,
            stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for `POST /clear`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub status: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            status: "cleared".to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_response_serialize() {
        let resp = QueryResponse::from(QueryOutcome::Hit {
            question_id: 4,
            answer: "cached".into(),
            access_count: 3,
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "hit");
        assert_eq!(json["llm_answer"], "cached");
        assert_eq!(json["access_count"], 3);
        assert_eq!(json["from_cache"], true);
    }

    #[test]
    fn test_miss_response_serialize() {
        let resp = QueryResponse::from(QueryOutcome::Miss {
            question_id: 4,
            answer: "fresh".into(),
            score: 0.5,
            cache_size: 9,
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "miss");
        assert_eq!(json["access_count"], 1);
        assert_eq!(json["from_cache"], false);
        assert_eq!(json["cache_size"], 9);
    }

    #[test]
    fn test_stats_response_rates() {
        let stats = CacheStats {
            hits: 2,
            misses: 1,
            total_queries: 3,
            evictions: 0,
        };
        let resp = StatsResponse::new(stats, 1, 100, EvictionPolicy::Lfu, 3600);
        assert_eq!(resp.hit_rate, "66.67%");
        assert_eq!(resp.miss_rate, "33.33%");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["policy"], "LFU");
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::new(CacheStats::default(), 0, 10, EvictionPolicy::Lru, 0);
        assert_eq!(resp.hit_rate, "0.00%");
        assert_eq!(resp.miss_rate, "0.00%");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::ok(0, 10, EvictionPolicy::Fifo, CacheStats::default());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"ok\""));
        assert!(json.contains("timestamp"));
        assert!(json.contains("FIFO"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
