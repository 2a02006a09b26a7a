//! Registry of canonical Medu content entries.
//!
//! The registry holds the currently valid entries and the indices derived
//! from them. It is the only mutable shared state in a corpus build; every
//! mutation is an [`ContentStore::upsert`] that succeeds only when the offered
//! version is strictly greater than the stored one.
//!
//! # Modules
//!
//! - [`error`] — [`RegistryError`] and [`RegistryResult`]
//! - [`traits`] — The [`ContentStore`] trait
//! - [`memory`] — [`InMemoryRegistry`], the `RwLock`-backed implementation
//! - [`types`] — Upsert outcomes and cross-reference resolutions

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{RegistryError, RegistryResult};
pub use memory::InMemoryRegistry;
pub use traits::ContentStore;
pub use types::{RegistryStats, Resolution, ResolvedReference, UpsertOutcome};
