use thiserror::Error;

use crate::store::StoreError;

/// Errors emitted by the ingestion pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("core error: {0}")]
    Core(#[from] estrella_core::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The emptiness precondition failed; nothing was processed.
    #[error("table \"{table}\" is not empty; refusing to load")]
    TablesNotEmpty { table: String },
    #[error("row {row}: expected {expected} fields, got {got}")]
    MalformedRecord { row: u64, expected: usize, got: usize },
    #[error("row {row}: no continent known for country code '{code}'")]
    UnknownCountry { row: u64, code: String },
}
