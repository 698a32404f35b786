use thiserror::Error;

/// Core error type shared across Estrella crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller broke an API contract (arity mismatch, bad column selection).
    #[error("contract violation: {0}")]
    Contract(String),
    /// A natural key was resolved before it was inserted or pre-seeded.
    #[error("unknown natural key '{key}' in table '{table}'")]
    UnknownKey { table: String, key: String },
    /// The declared foreign-key graph has no topological order.
    #[error("cyclic schema: {0}")]
    CyclicSchema(String),
}

/// Convenience alias for results returned by Estrella crates.
pub type Result<T> = std::result::Result<T, Error>;
