//! Canonical content model for Medu.
//!
//! Every raw content export, whatever its source shape, is normalized into the
//! types defined here. Nothing downstream of the adapters inspects raw shape
//! details again. Every other Medu crate depends on `medu-types`.
//!
//! # Key Types
//!
//! - [`ContentEntry`] — One unit of educational content with five tiered levels
//! - [`LevelContent`] — The English/Spanish payload of a single level
//! - [`LevelNumber`] — Ordinal level, guaranteed to be in `1..=5`
//! - [`TagSet`] — Normalized tags (free text + clinical/exam relevance)
//! - [`ValidationIssue`] — One finding of the validator, with [`Severity`]
//! - [`ContentDigest`] — BLAKE3 digest of an entry's canonical form

pub mod digest;
pub mod entry;
pub mod error;
pub mod issue;
pub mod level;
pub mod tags;
pub mod temporal;

pub use digest::ContentDigest;
pub use entry::{
    Citation, ContentEntry, ContentStatus, CounselingKind, CounselingNote, CrossReference,
    KeyTerm, LevelContent, MediaRef,
};
pub use error::TypeError;
pub use issue::{Severity, ValidationIssue};
pub use level::LevelNumber;
pub use tags::{normalize_tag, ClinicalRelevance, ExamRelevance, TagSet};
pub use temporal::parse_timestamp;
