use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use medu_types::ContentEntry;

use crate::error::{AdaptResult, EntryLocator};
use crate::shape::SourceShape;

// ---------------------------------------------------------------------------
// NormalizationNote
// ---------------------------------------------------------------------------

/// What an adapter did to a field that the source did not provide verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NoteKind {
    /// The field was absent and a default (empty) value was used.
    Defaulted,
    /// The field was derived from another source field.
    Synthesized { from: String },
    /// The value was read from a legacy field name.
    Renamed { from: String },
}

/// Top-level collections every entry is expected to carry, even when empty.
pub const ADVISORY_FIELDS: &[&str] = &["media", "citations", "crossReferences", "tags"];

/// A record of one normalization decision, for auditing adapter output.
///
/// Notes are informational. Coverage gaps they hint at (missing `nameEs`,
/// missing Spanish bodies) are reported as warnings by the validator. The
/// canonical model cannot tell an absent collection from an empty one, so
/// [`Self::is_missing_advisory_field`] is how a caller surfaces those.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationNote {
    pub path: String,
    #[serde(flatten)]
    pub kind: NoteKind,
}

impl NormalizationNote {
    pub fn defaulted(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NoteKind::Defaulted,
        }
    }

    pub fn synthesized(path: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NoteKind::Synthesized { from: from.into() },
        }
    }

    pub fn renamed(path: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NoteKind::Renamed { from: from.into() },
        }
    }

    /// The source omitted one of [`ADVISORY_FIELDS`].
    pub fn is_missing_advisory_field(&self) -> bool {
        self.kind == NoteKind::Defaulted && ADVISORY_FIELDS.contains(&self.path.as_str())
    }
}

impl fmt::Display for NormalizationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NoteKind::Defaulted => write!(f, "{}: absent, defaulted", self.path),
            NoteKind::Synthesized { from } => write!(f, "{}: synthesized from {from}", self.path),
            NoteKind::Renamed { from } => write!(f, "{}: read from legacy `{from}`", self.path),
        }
    }
}

// ---------------------------------------------------------------------------
// Adapted
// ---------------------------------------------------------------------------

/// Output of a successful normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct Adapted {
    pub entry: ContentEntry,
    /// Shape the raw object was recognized as.
    pub shape: SourceShape,
    pub notes: Vec<NormalizationNote>,
}

// ---------------------------------------------------------------------------
// ShapeAdapter trait
// ---------------------------------------------------------------------------

/// Converts one recognized raw shape into the canonical model.
///
/// Implementations must be pure: no I/O, no shared state, and the same input
/// always produces the same output. `matches` must only inspect the level key
/// style and the field names of the sample level, so that detection stays
/// cheap and the adapters' claims stay disjoint.
pub trait ShapeAdapter: Send + Sync {
    /// The shape this adapter handles.
    fn shape(&self) -> SourceShape;

    /// Returns `true` if `raw` looks like this adapter's shape.
    fn matches(&self, raw: &Value) -> bool;

    /// Normalize `raw`. Only called after `matches` returned `true`.
    fn adapt(&self, raw: &Value, locator: &EntryLocator) -> AdaptResult<Adapted>;
}
