//! Corpus loading for Medu.
//!
//! [`Corpus`] wires the shape adapters, the validator and the registry into a
//! single-pass batch load:
//!
//! ```text
//! raw JSON -> AdapterSet -> Validator (per entry) -> Registry.upsert
//!          -> ... every entry ... -> Validator (corpus pass) -> LoadReport
//! ```
//!
//! Loading is all-or-nothing only at the reporting level: a [`LoadReport`] is
//! always produced, and every entry that passes its own validation stays
//! registered even when siblings fail.
//!
//! # Modules
//!
//! - [`corpus`] — The [`Corpus`] pipeline
//! - [`config`] — [`CorpusConfig`], loadable from TOML
//! - [`report`] — [`LoadReport`] and per-entry [`EntryOutcome`]s
//! - [`coverage`] — Translation [`CoverageReport`]

pub mod config;
pub mod corpus;
pub mod coverage;
pub mod error;
pub mod report;

#[cfg(test)]
mod fixtures;

pub use config::CorpusConfig;
pub use corpus::Corpus;
pub use coverage::{CoverageReport, CoverageSummary, EntryCoverage};
pub use error::{CorpusError, CorpusResult};
pub use report::{EntryOutcome, LoadReport};
