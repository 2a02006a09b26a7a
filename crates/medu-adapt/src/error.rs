//! Error types for adapter operations.

use std::fmt;

use thiserror::Error;

/// Identifies the raw entry an error belongs to: its id when the raw object
/// carries one, otherwise its position in the batch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryLocator {
    Id(String),
    Index(usize),
}

impl EntryLocator {
    /// Locate a raw object: by its `id` field if it is a non-empty string,
    /// else by `index`.
    pub fn of(raw: &serde_json::Value, index: usize) -> Self {
        match raw.get("id").and_then(|v| v.as_str()) {
            Some(id) if !id.trim().is_empty() => Self::Id(id.to_string()),
            _ => Self::Index(index),
        }
    }
}

impl fmt::Display for EntryLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Index(i) => write!(f, "#{i}"),
        }
    }
}

/// Errors that can occur while normalizing a raw entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdaptError {
    /// The raw object matches no known shape, or more than one.
    #[error("{locator}: shape unrecognized: {reason}")]
    ShapeUnrecognized {
        locator: EntryLocator,
        reason: String,
    },

    /// A required field is absent.
    #[error("{locator}: missing required field `{path}`")]
    MissingField { locator: EntryLocator, path: String },

    /// A field is present but has the wrong type or an invalid value.
    #[error("{locator}: malformed field `{path}`: {reason}")]
    Malformed {
        locator: EntryLocator,
        path: String,
        reason: String,
    },
}

impl AdaptError {
    /// The entry this error belongs to.
    pub fn locator(&self) -> &EntryLocator {
        match self {
            Self::ShapeUnrecognized { locator, .. }
            | Self::MissingField { locator, .. }
            | Self::Malformed { locator, .. } => locator,
        }
    }

    /// The offending field path, if the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::ShapeUnrecognized { .. } => None,
            Self::MissingField { path, .. } | Self::Malformed { path, .. } => Some(path),
        }
    }

    pub fn is_shape_unrecognized(&self) -> bool {
        matches!(self, Self::ShapeUnrecognized { .. })
    }
}

/// Convenience alias for adapter results.
pub type AdaptResult<T> = Result<T, AdaptError>;
