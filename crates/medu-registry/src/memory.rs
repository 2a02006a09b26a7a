//! In-memory registry.
//!
//! [`InMemoryRegistry`] keeps every index behind a single `RwLock`. Readers
//! share the read lock; [`ContentStore::upsert`] holds the write lock across
//! the version check and the write, which serializes same-id upserts.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use medu_types::ContentEntry;

use crate::error::{RegistryError, RegistryResult};
use crate::traits::ContentStore;
use crate::types::{RegistryStats, Resolution, ResolvedReference, UpsertOutcome};

struct Slot {
    entry: Arc<ContentEntry>,
    /// Insertion sequence of the first version of this id.
    seq: u64,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Slot>,
    order: BTreeMap<u64, String>,
    next_seq: u64,
    /// Normalized tag -> sequences of the entries carrying it.
    tags: HashMap<String, BTreeSet<u64>>,
    /// Target id -> sequences of the entries referencing it.
    referrers: HashMap<String, BTreeSet<u64>>,
}

impl Inner {
    fn index(&mut self, seq: u64, entry: &ContentEntry) {
        for key in entry.tags.index_keys() {
            self.tags.entry(key).or_default().insert(seq);
        }
        for target in entry.target_ids() {
            self.referrers.entry(target.to_string()).or_default().insert(seq);
        }
    }

    fn unindex(&mut self, seq: u64, entry: &ContentEntry) {
        for key in entry.tags.index_keys() {
            remove_seq(&mut self.tags, &key, seq);
        }
        for target in entry.target_ids() {
            remove_seq(&mut self.referrers, target, seq);
        }
    }

    fn ids_at<'a>(&'a self, seqs: Option<&'a BTreeSet<u64>>) -> impl Iterator<Item = &'a String> + 'a {
        seqs.into_iter()
            .flatten()
            .filter_map(|seq| self.order.get(seq))
    }
}

fn remove_seq(index: &mut HashMap<String, BTreeSet<u64>>, key: &str, seq: u64) {
    if let Some(seqs) = index.get_mut(key) {
        seqs.remove(&seq);
        if seqs.is_empty() {
            index.remove(key);
        }
    }
}

/// An in-memory implementation of [`ContentStore`].
///
/// Entries are shared as `Arc<ContentEntry>`; a replaced entry stays alive for
/// readers that still hold it.
pub struct InMemoryRegistry {
    inner: RwLock<Inner>,
}

impl InMemoryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    fn read(&self) -> RegistryResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> RegistryResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.read().map(|inner| inner.entries.len()).ok();
        f.debug_struct("InMemoryRegistry")
            .field("entries", &entries)
            .finish()
    }
}

impl ContentStore for InMemoryRegistry {
    fn upsert(&self, entry: ContentEntry) -> RegistryResult<UpsertOutcome> {
        let mut inner = self.write()?;
        let entry = Arc::new(entry);

        let existing = inner
            .entries
            .get(&entry.id)
            .map(|slot| (slot.seq, Arc::clone(&slot.entry)));

        match existing {
            Some((seq, stored)) => {
                if entry.version <= stored.version {
                    debug!(
                        id = %entry.id,
                        stored = stored.version,
                        offered = entry.version,
                        "stale upsert rejected"
                    );
                    return Err(RegistryError::StaleVersion {
                        id: entry.id.clone(),
                        stored: stored.version,
                        offered: entry.version,
                    });
                }
                inner.unindex(seq, &stored);
                inner.index(seq, &entry);
                info!(
                    id = %entry.id,
                    previous = stored.version,
                    version = entry.version,
                    "entry replaced"
                );
                inner.entries.insert(entry.id.clone(), Slot { entry, seq });
                Ok(UpsertOutcome::Replaced {
                    previous: stored.version,
                })
            }
            None => {
                let seq = inner.next_seq;
                inner.next_seq += 1;
                inner.index(seq, &entry);
                inner.order.insert(seq, entry.id.clone());
                debug!(id = %entry.id, version = entry.version, "entry inserted");
                inner.entries.insert(entry.id.clone(), Slot { entry, seq });
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    fn get(&self, id: &str) -> RegistryResult<Option<Arc<ContentEntry>>> {
        let inner = self.read()?;
        Ok(inner.entries.get(id).map(|slot| Arc::clone(&slot.entry)))
    }

    fn list_by_tag(&self, tag: &str) -> RegistryResult<Vec<Arc<ContentEntry>>> {
        let inner = self.read()?;
        let key = medu_types::normalize_tag(tag);
        Ok(inner
            .ids_at(inner.tags.get(&key))
            .filter_map(|id| inner.entries.get(id))
            .map(|slot| Arc::clone(&slot.entry))
            .collect())
    }

    fn resolve_cross_references(&self, id: &str) -> RegistryResult<Vec<ResolvedReference>> {
        let inner = self.read()?;
        let slot = inner
            .entries
            .get(id)
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })?;
        Ok(slot
            .entry
            .cross_references
            .iter()
            .map(|reference| {
                let resolution = match inner.entries.get(&reference.target_id) {
                    Some(target) => Resolution::Resolved(Arc::clone(&target.entry)),
                    None => Resolution::Unresolved(reference.target_id.clone()),
                };
                ResolvedReference {
                    reference: reference.clone(),
                    resolution,
                }
            })
            .collect())
    }

    fn referenced_by(&self, id: &str) -> RegistryResult<Vec<String>> {
        let inner = self.read()?;
        Ok(inner.ids_at(inner.referrers.get(id)).cloned().collect())
    }

    fn ids(&self) -> RegistryResult<Vec<String>> {
        let inner = self.read()?;
        Ok(inner.order.values().cloned().collect())
    }

    fn stats(&self) -> RegistryResult<RegistryStats> {
        let inner = self.read()?;
        Ok(RegistryStats {
            entries: inner.entries.len(),
            tags: inner.tags.len(),
            references: inner.referrers.values().map(BTreeSet::len).sum(),
        })
    }

    fn contains(&self, id: &str) -> RegistryResult<bool> {
        Ok(self.read()?.entries.contains_key(id))
    }

    fn len(&self) -> RegistryResult<usize> {
        Ok(self.read()?.entries.len())
    }
}
