//! Shape adapters for Medu.
//!
//! The content corpus holds two incompatible shapes for the same entity:
//!
//! - **numeric levels**: `levels` keyed `"1"`..`"5"`, each level carrying
//!   `summary` / `explanation` / `patientCounselingPoints`
//! - **string levels**: `levels` keyed `"level1"`..`"level5"`, each level
//!   carrying `title` / `titleEs` / `content` / `contentEs` / `clinicalNotes`
//!
//! A third adapter accepts entries that are already canonical (for example a
//! previous normalized export), which makes normalization idempotent.
//!
//! Adapters are pure functions from an untyped [`serde_json::Value`] to a
//! canonical [`medu_types::ContentEntry`]. Detection is deterministic and
//! fails closed: a raw object that matches no adapter, or more than one,
//! yields [`AdaptError::ShapeUnrecognized`].
//!
//! # Modules
//!
//! - [`adapter`] — The [`ShapeAdapter`] trait, [`Adapted`] output and notes
//! - [`set`] — [`AdapterSet`]: detection and dispatch
//! - [`numeric`], [`string_level`], [`canonical`] — The built-in adapters
//! - [`shape`] — Source shape tags and level key-style detection

pub mod adapter;
pub mod canonical;
mod common;
pub mod error;
mod fields;
pub mod numeric;
pub mod set;
pub mod shape;
pub mod string_level;

pub use adapter::{Adapted, NormalizationNote, NoteKind, ShapeAdapter, ADVISORY_FIELDS};
pub use canonical::CanonicalAdapter;
pub use error::{AdaptError, AdaptResult, EntryLocator};
pub use fields::type_name;
pub use numeric::NumericLevelAdapter;
pub use set::{adapt, AdapterSet};
pub use shape::{LevelKeyStyle, SourceShape};
pub use string_level::StringLevelAdapter;
