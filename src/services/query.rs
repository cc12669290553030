//! Query Service
//!
//! Serves one logical question: cache lookup, and on a miss answer
//! generation, scoring, memoization and persistence.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::cache::{derive_key, CacheStore, InflightLocks, Lookup};
use crate::error::{CacheError, Result};
use crate::models::QueryRequest;
use crate::services::{AnswerGenerator, NewQueryRecord, ResultStore, ScoreMethod, Scorer};

// == Query Outcome ==
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Hit {
        question_id: i64,
        answer: String,
        access_count: u64,
    },
    Miss {
        question_id: i64,
        answer: String,
        score: f64,
        cache_size: usize,
    },
}

// == Build Query ==
/// Joins title and content into the text sent to the answer generator.
///
/// Content that is blank or the literal `nan` (an artifact of tabular
/// datasets) is dropped. A query that ends up empty or `nan` is rejected.
pub fn build_query(title: &str, content: &str) -> Result<String> {
    let title = title.trim();
    let mut content = content.trim();
    if content.eq_ignore_ascii_case("nan") {
        content = "";
    }

    let query = format!("{} {}", title, content).trim().to_string();
    if query.is_empty() || query.eq_ignore_ascii_case("nan") {
        return Err(CacheError::InvalidRequest("Invalid query".to_string()));
    }

    Ok(query)
}

// == Query Service ==
pub struct QueryService {
    cache: Arc<RwLock<CacheStore>>,
    inflight: InflightLocks,
    generator: Arc<dyn AnswerGenerator>,
    scorer: Arc<dyn Scorer>,
    results: Arc<dyn ResultStore>,
    score_method: ScoreMethod,
}

impl QueryService {
    pub fn new(
        cache: Arc<RwLock<CacheStore>>,
        generator: Arc<dyn AnswerGenerator>,
        scorer: Arc<dyn Scorer>,
        results: Arc<dyn ResultStore>,
        score_method: ScoreMethod,
    ) -> Self {
        Self {
            cache,
            inflight: InflightLocks::new(),
            generator,
            scorer,
            results,
            score_method,
        }
    }

    // == Handle ==
    /// Answers one question.
    ///
    /// The question's fingerprint stays reserved from lookup until the
    /// answer is memoized, so concurrent identical questions reach the
    /// generator once and the later ones are served from the cache.
    pub async fn handle(&self, req: &QueryRequest) -> Result<QueryOutcome> {
        let query = build_query(&req.question_title, &req.question_content)?;
        let key = derive_key(&req.question_title, &req.question_content);

        let _reservation = self.inflight.reserve(&key).await;

        let lookup = self.cache.write().await.get_by_key(&key);
        match lookup {
            Lookup::Hit(hit) => {
                info!(
                    question_id = req.question_id,
                    access_count = hit.access_count,
                    "cache hit"
                );

                if let Err(e) = self
                    .results
                    .record_hit(req.question_id, hit.access_count)
                    .await
                {
                    warn!(question_id = req.question_id, error = %e, "failed to update result store");
                }

                Ok(QueryOutcome::Hit {
                    question_id: req.question_id,
                    answer: hit.answer,
                    access_count: hit.access_count,
                })
            }
            Lookup::Miss => {
                info!(question_id = req.question_id, "cache miss");

                let answer = self.generator.generate(&query).await.map_err(|e| {
                    error!(question_id = req.question_id, error = %e, "answer generation failed");
                    e
                })?;
                if answer.trim().is_empty() {
                    error!(question_id = req.question_id, "answer generator returned an empty answer");
                    return Err(CacheError::Upstream(
                        "answer generator returned an empty answer".to_string(),
                    ));
                }

                let score = self.score(&answer, &req.original_answer).await?;

                let cache_size = {
                    let mut cache = self.cache.write().await;
                    cache.put_by_key(key, answer.clone(), req.original_answer.clone());
                    cache.size()
                };

                let record = NewQueryRecord {
                    question_id: req.question_id,
                    question_title: req.question_title.clone(),
                    question_content: req.question_content.clone(),
                    original_answer: req.original_answer.clone(),
                    llm_answer: answer.clone(),
                    score,
                };
                if let Err(e) = self.results.record_miss(record).await {
                    warn!(question_id = req.question_id, error = %e, "failed to save to result store");
                }

                info!(question_id = req.question_id, score, cache_size, "miss processed");

                Ok(QueryOutcome::Miss {
                    question_id: req.question_id,
                    answer,
                    score,
                    cache_size,
                })
            }
        }
    }

    /// Scores an answer; with no reference to compare against the score is 0.
    async fn score(&self, answer: &str, reference: &str) -> Result<f64> {
        if reference.trim().is_empty() {
            return Ok(0.0);
        }

        self.scorer
            .score(answer, reference, self.score_method)
            .await
            .map_err(|e| {
                error!(error = %e, "scoring failed");
                e
            })
    }
}
