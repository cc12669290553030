//! Result Store
//!
//! Contract for the persistent record of answered questions, plus an
//! in-memory implementation with the same upsert-by-question-id semantics.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::Result;

// == Query Record ==
/// One answered question as the result store keeps it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRecord {
    pub question_id: i64,
    pub question_title: String,
    pub question_content: String,
    pub original_answer: String,
    pub llm_answer: String,
    pub score: f64,
    pub access_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}

/// Fields supplied when a miss is recorded.
#[derive(Debug, Clone)]
pub struct NewQueryRecord {
    pub question_id: i64,
    pub question_title: String,
    pub question_content: String,
    pub original_answer: String,
    pub llm_answer: String,
    pub score: f64,
}

// == Result Store ==
/// Upsert-by-question-id store. Records are never deleted.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Creates the record with access count 1, or bumps the count of an
    /// existing one and refreshes its timestamp.
    async fn record_miss(&self, record: NewQueryRecord) -> Result<()>;

    /// Sets the stored access count to the cache's count. Unknown ids are
    /// ignored.
    async fn record_hit(&self, question_id: i64, access_count: u64) -> Result<()>;

    async fn get(&self, question_id: i64) -> Result<Option<QueryRecord>>;
}

// == Memory Result Store ==
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    records: RwLock<HashMap<i64, QueryRecord>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn record_miss(&self, record: NewQueryRecord) -> Result<()> {
        let now = Utc::now();
        let mut records = self.records.write().await;

        records
            .entry(record.question_id)
            .and_modify(|existing| {
                existing.access_count += 1;
                existing.last_accessed = now;
            })
            .or_insert_with(|| QueryRecord {
                question_id: record.question_id,
                question_title: record.question_title,
                question_content: record.question_content,
                original_answer: record.original_answer,
                llm_answer: record.llm_answer,
                score: record.score,
                access_count: 1,
                created_at: now,
                last_accessed: now,
            });

        Ok(())
    }

    async fn record_hit(&self, question_id: i64, access_count: u64) -> Result<()> {
        let mut records = self.records.write().await;
        if let Some(existing) = records.get_mut(&question_id) {
            existing.access_count = access_count;
            existing.last_accessed = Utc::now();
        }
        Ok(())
    }

    async fn get(&self, question_id: i64) -> Result<Option<QueryRecord>> {
        Ok(self.records.read().await.get(&question_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(id: i64, answer: &str) -> NewQueryRecord {
        NewQueryRecord {
            question_id: id,
            question_title: "title".into(),
            question_content: String::new(),
            original_answer: "reference".into(),
            llm_answer: answer.into(),
            score: 0.5,
        }
    }

    #[tokio::test]
    async fn test_first_write_creates_record() {
        let store = MemoryResultStore::new();

        store.record_miss(new_record(7, "a")).await.unwrap();

        let record = store.get(7).await.unwrap().unwrap();
        assert_eq!(record.access_count, 1);
        assert_eq!(record.llm_answer, "a");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_repeat_write_increments_and_keeps_content() {
        let store = MemoryResultStore::new();

        store.record_miss(new_record(7, "a")).await.unwrap();
        store.record_miss(new_record(7, "b")).await.unwrap();

        let record = store.get(7).await.unwrap().unwrap();
        assert_eq!(record.access_count, 2);
        assert_eq!(record.llm_answer, "a");
        assert!(record.last_accessed >= record.created_at);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_record_hit_sets_count() {
        let store = MemoryResultStore::new();

        store.record_miss(new_record(1, "a")).await.unwrap();
        store.record_hit(1, 5).await.unwrap();
        store.record_hit(99, 3).await.unwrap();

        assert_eq!(store.get(1).await.unwrap().unwrap().access_count, 5);
        assert!(store.get(99).await.unwrap().is_none());
    }
}
