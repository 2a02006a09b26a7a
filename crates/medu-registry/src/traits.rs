//! The [`ContentStore`] trait defining the registry interface.

use std::sync::Arc;

use medu_types::ContentEntry;

use crate::error::{RegistryError, RegistryResult};
use crate::types::{RegistryStats, ResolvedReference, UpsertOutcome};

/// Storage for the currently valid canonical entries and their indices.
///
/// Implementations must be thread-safe (`Send + Sync`). All mutation goes
/// through [`ContentStore::upsert`], which must perform its version check and
/// its write atomically so that concurrent upserts of the same id cannot both
/// succeed.
pub trait ContentStore: Send + Sync {
    /// Insert `entry`, or replace the stored entry with the same id if
    /// `entry.version` is strictly greater. Otherwise fails with
    /// [`RegistryError::StaleVersion`] and changes nothing.
    fn upsert(&self, entry: ContentEntry) -> RegistryResult<UpsertOutcome>;

    /// The entry with this id. Returns `Ok(None)` if absent.
    fn get(&self, id: &str) -> RegistryResult<Option<Arc<ContentEntry>>>;

    /// Entries whose tag set contains `tag` (case-insensitive), in insertion
    /// order.
    fn list_by_tag(&self, tag: &str) -> RegistryResult<Vec<Arc<ContentEntry>>>;

    /// Every cross reference of `id`, each resolved or marked unresolved.
    ///
    /// Fails with [`RegistryError::NotFound`] if `id` itself is absent.
    fn resolve_cross_references(&self, id: &str) -> RegistryResult<Vec<ResolvedReference>>;

    /// Ids of registered entries that reference `id`, in insertion order.
    /// `id` itself need not be registered.
    fn referenced_by(&self, id: &str) -> RegistryResult<Vec<String>>;

    /// All registered ids in insertion order. A replacement keeps the
    /// position of the first insertion.
    fn ids(&self) -> RegistryResult<Vec<String>>;

    fn stats(&self) -> RegistryResult<RegistryStats>;

    /// Like [`ContentStore::get`], but absence is an error.
    fn require(&self, id: &str) -> RegistryResult<Arc<ContentEntry>> {
        self.get(id)?.ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    /// The stored version of `id`, if registered.
    fn version_of(&self, id: &str) -> RegistryResult<Option<u32>> {
        Ok(self.get(id)?.map(|e| e.version))
    }

    fn contains(&self, id: &str) -> RegistryResult<bool> {
        Ok(self.get(id)?.is_some())
    }

    fn len(&self) -> RegistryResult<usize> {
        Ok(self.stats()?.entries)
    }

    fn is_empty(&self) -> RegistryResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Every registered entry in insertion order.
    fn entries(&self) -> RegistryResult<Vec<Arc<ContentEntry>>> {
        let mut out = Vec::new();
        for id in self.ids()? {
            if let Some(entry) = self.get(&id)? {
                out.push(entry);
            }
        }
        Ok(out)
    }
}
