//! Error types for query operations.

use medu_registry::RegistryError;
use thiserror::Error;

/// Errors returned by [`crate::ContentQuery`].
///
/// The `NotFound` variants are ordinary outcomes: consumers treat them as
/// "do not render this".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("content not found: {id}")]
    NotFound { id: String },

    /// The requested level number is outside `1..=5`.
    #[error("level {level} is out of range 1..=5")]
    LevelOutOfRange { level: u8 },

    /// The entry exists but lacks the requested level.
    #[error("level {level} not found in {id}")]
    LevelNotFound { id: String, level: u8 },

    #[error("registry error: {0}")]
    Registry(RegistryError),
}

impl QueryError {
    /// Returns `true` for every flavor of absence.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::LevelOutOfRange { .. } | Self::LevelNotFound { .. }
        )
    }
}

impl From<RegistryError> for QueryError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { id } => Self::NotFound { id },
            other => Self::Registry(other),
        }
    }
}

/// Convenience type alias for query operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
