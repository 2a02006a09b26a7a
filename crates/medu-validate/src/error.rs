//! Error types for validation.
//!
//! Invariant violations are not errors: they are [`medu_types::ValidationIssue`]
//! records in a report. These errors only cover failing to run a pass.

use medu_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Convenience type alias for validation operations.
pub type ValidateResult<T> = std::result::Result<T, ValidateError>;
