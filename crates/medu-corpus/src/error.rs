//! Error types for corpus loading.
//!
//! Per-entry failures never surface here; they are recorded in the
//! [`crate::LoadReport`]. These errors abort a whole operation.

use medu_registry::RegistryError;
use medu_validate::ValidateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    /// The batch itself is unusable (for example, not an array).
    #[error("malformed batch: {0}")]
    MalformedBatch(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("validation error: {0}")]
    Validate(#[from] ValidateError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for corpus operations.
pub type CorpusResult<T> = std::result::Result<T, CorpusError>;
