//! Services Module
//!
//! External collaborators consumed by the cache server and the query
//! orchestration built on top of them.

mod generator;
mod query;
mod scorer;
mod storage;

pub use generator::{AnswerGenerator, HttpAnswerGenerator, GENERATOR_TIMEOUT};
pub use query::{build_query, QueryOutcome, QueryService};
pub use scorer::{HttpScorer, ScoreMethod, Scorer, SCORER_TIMEOUT};
pub use storage::{MemoryResultStore, NewQueryRecord, QueryRecord, ResultStore};
