//! Sink trait and error types.

use crate::article::Article;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the persistence layer.
///
/// Always recovered per article: a failed write is logged and counted,
/// never fatal to the run.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("database error: {0}")]
    Database(String),

    #[error("article rejected as malformed: {0:?}")]
    Malformed(String),

    #[error("intake endpoint error: {0}")]
    Intake(String),
}

impl From<rusqlite::Error> for SinkError {
    fn from(err: rusqlite::Error) -> Self {
        SinkError::Database(err.to_string())
    }
}

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Storage backend with upsert-by-URL semantics.
///
/// `upsert` must be safe to call concurrently from multiple tasks, and
/// must leave exactly one record per URL no matter how often it is called.
#[async_trait]
pub trait ArticleSink: Send + Sync {
    /// Inserts `article`, or overwrites the record sharing its URL.
    async fn upsert(&self, article: &Article) -> SinkResult<()>;
}
