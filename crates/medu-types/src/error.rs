use thiserror::Error;

/// Errors produced by canonical type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("level {0} is outside 1..=5")]
    LevelOutOfRange(i64),

    #[error("unknown clinical relevance: {0}")]
    UnknownClinicalRelevance(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
