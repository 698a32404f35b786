use async_trait::async_trait;
use thiserror::Error;

/// Database failure surfaced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(String),
}

/// The seam between the pipeline and the target data store.
///
/// The store receives arbitrary statement text; transaction semantics are
/// whatever the backend provides for one batch. The engine never talks to a
/// database directly, which keeps the pipeline testable against an
/// in-memory fake.
#[async_trait]
pub trait SqlStore: Send + Sync {
    /// Run a read query and return rows as display strings.
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Vec<String>>, StoreError>;

    /// Execute a batch of statements as one unit.
    async fn execute_batch(&self, sql: &str) -> Result<(), StoreError>;
}
