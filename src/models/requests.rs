//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP query parameters.

use serde::Deserialize;

/// Query parameters for `GET /query`
///
/// # Fields
/// - `question_id`: Identifier used by the result store
/// - `question_title`: Question title, part of the cache key
/// - `question_content`: Optional question body, part of the cache key
/// - `original_answer`: Reference answer used for scoring
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub question_id: i64,
    pub question_title: String,
    #[serde(default)]
    pub question_content: String,
    #[serde(default)]
    pub original_answer: String,
}
