//! Validation for canonical Medu content.
//!
//! Two passes enforce the content invariants:
//!
//! - the **per-entry pass** ([`Validator::validate_entry`]) runs right after
//!   normalization and decides whether an entry may enter the registry;
//! - the **corpus pass** ([`Validator::validate_corpus`]) runs once a batch is
//!   fully loaded and resolves every cross reference.
//!
//! Structural and referential violations are `error` issues; translation
//! coverage gaps and advisory findings are `warning` issues.
//!
//! # Modules
//!
//! - [`check`] — The [`EntryCheck`] trait and [`Findings`] collector
//! - [`checks`] — Built-in checks
//! - [`config`] — [`ValidatorConfig`] vocabularies and switches
//! - [`report`] — [`ValidationReport`]
//! - [`validator`] — The [`Validator`] pipeline

pub mod check;
pub mod checks;
pub mod config;
pub mod error;
pub mod report;
pub mod validator;

pub use check::{CheckContext, EntryCheck, Findings};
pub use config::ValidatorConfig;
pub use error::{ValidateError, ValidateResult};
pub use report::ValidationReport;
pub use validator::Validator;
