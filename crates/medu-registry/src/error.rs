//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An upsert offered a version not strictly greater than the stored one.
    /// The registry is unchanged.
    #[error("stale version for {id}: stored v{stored}, offered v{offered}")]
    StaleVersion { id: String, stored: u32, offered: u32 },

    /// No entry with this id is registered.
    #[error("content not found: {id}")]
    NotFound { id: String },

    /// A writer panicked while holding the registry lock.
    #[error("registry lock poisoned: {0}")]
    LockPoisoned(String),
}

impl RegistryError {
    pub fn is_stale_version(&self) -> bool {
        matches!(self, Self::StaleVersion { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience type alias for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
