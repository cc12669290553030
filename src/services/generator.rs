//! Answer Generator Client
//!
//! Contract and HTTP client for the backend that answers free-text questions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CacheError, Result};

/// Generator requests are slow; anything past this is treated as failed.
pub const GENERATOR_TIMEOUT: Duration = Duration::from_secs(60);

// == Answer Generator ==
/// Produces an answer for a non-empty query. Implementations do not retry.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, query: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// == HTTP Answer Generator ==
/// Calls `GET {url}?query=...` and reads `{"answer": ...}`.
#[derive(Debug, Clone)]
pub struct HttpAnswerGenerator {
    client: Client,
    url: String,
}

impl HttpAnswerGenerator {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, GENERATOR_TIMEOUT)
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
impl AnswerGenerator for HttpAnswerGenerator {
    async fn generate(&self, query: &str) -> Result<String> {
        debug!(url = %self.url, "querying answer generator");

        let response: GenerateResponse = self
            .client
            .get(&self.url)
            .query(&[("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(CacheError::Upstream(format!("answer generator: {}", error)));
        }

        Ok(response.answer.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_answer() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"answer": "42"}"#).unwrap();
        assert_eq!(resp.answer.as_deref(), Some("42"));
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_response_with_error() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"error": "quota"}"#).unwrap();
        assert!(resp.answer.is_none());
        assert_eq!(resp.error.as_deref(), Some("quota"));
    }

    #[tokio::test]
    async fn test_unreachable_generator_is_upstream_error() {
        let generator =
            HttpAnswerGenerator::with_timeout("http://127.0.0.1:1/ask", Duration::from_secs(2))
                .unwrap();

        let result = generator.generate("anything").await;
        assert!(matches!(result, Err(CacheError::Upstream(_))));
    }
}
