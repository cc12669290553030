//! Scorer Client
//!
//! Contract and HTTP client for the service that rates a generated answer
//! against the reference answer.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CacheError, Result};

pub const SCORER_TIMEOUT: Duration = Duration::from_secs(10);

// == Score Method ==
/// Similarity metric requested from the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMethod {
    Tfidf,
    Jaccard,
    Levenshtein,
    /// Weighted blend (0.5 tfidf, 0.3 jaccard, 0.2 levenshtein); reported as `recommended_score`
    Combined,
}

impl ScoreMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMethod::Tfidf => "tfidf",
            ScoreMethod::Jaccard => "jaccard",
            ScoreMethod::Levenshtein => "levenshtein",
            ScoreMethod::Combined => "combined",
        }
    }
}

impl FromStr for ScoreMethod {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfidf" => Ok(ScoreMethod::Tfidf),
            "jaccard" => Ok(ScoreMethod::Jaccard),
            "levenshtein" => Ok(ScoreMethod::Levenshtein),
            "combined" => Ok(ScoreMethod::Combined),
            other => Err(CacheError::Configuration(format!(
                "unknown score method '{}', expected tfidf, jaccard, levenshtein or combined",
                other
            ))),
        }
    }
}

impl fmt::Display for ScoreMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Scorer ==
/// Rates `candidate` against `reference`, returning a value in `[0, 1]`.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, candidate: &str, reference: &str, method: ScoreMethod) -> Result<f64>;
}

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    llm_answer: &'a str,
    best_answer: &'a str,
    method: ScoreMethod,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    recommended_score: Option<f64>,
}

impl ScoreResponse {
    fn value(&self) -> f64 {
        self.score
            .or(self.recommended_score)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }
}

// == HTTP Scorer ==
/// Calls `POST {url}` with `{llm_answer, best_answer, method}`.
#[derive(Debug, Clone)]
pub struct HttpScorer {
    client: Client,
    url: String,
}

impl HttpScorer {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, SCORER_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    async fn score(&self, candidate: &str, reference: &str, method: ScoreMethod) -> Result<f64> {
        debug!(url = %self.url, %method, "requesting score");

        let response: ScoreResponse = self
            .client
            .post(&self.url)
            .json(&ScoreRequest {
                llm_answer: candidate,
                best_answer: reference,
                method,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("TFIDF".parse::<ScoreMethod>().unwrap(), ScoreMethod::Tfidf);
        assert_eq!("levenshtein".parse::<ScoreMethod>().unwrap(), ScoreMethod::Levenshtein);
        assert!("cosine".parse::<ScoreMethod>().is_err());
    }

    #[test]
    fn test_request_serialization() {
        let req = ScoreRequest {
            llm_answer: "a",
            best_answer: "b",
            method: ScoreMethod::Jaccard,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["llm_answer"], "a");
        assert_eq!(json["best_answer"], "b");
        assert_eq!(json["method"], "jaccard");
    }

    #[test]
    fn test_single_method_response() {
        let resp: ScoreResponse =
            serde_json::from_str(r#"{"score": 0.4213, "method": "tfidf"}"#).unwrap();
        assert!((resp.value() - 0.4213).abs() < 1e-9);
    }

    #[test]
    fn test_combined_response_uses_recommended_score() {
        let resp: ScoreResponse = serde_json::from_str(
            r#"{"scores": {"tfidf": 0.5}, "method": "combined", "recommended_score": 0.61}"#,
        )
        .unwrap();
        assert!((resp.value() - 0.61).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_clamped() {
        let resp: ScoreResponse = serde_json::from_str(r#"{"score": 1.7}"#).unwrap();
        assert_eq!(resp.value(), 1.0);
    }
}
