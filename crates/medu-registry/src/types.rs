use std::sync::Arc;

use serde::Serialize;

use medu_types::{ContentEntry, CrossReference};

/// What a successful upsert did.
#[derive(Clone, Debug, PartialEq)]
pub enum UpsertOutcome {
    /// The id was not registered before.
    Inserted,
    /// A lower version was replaced.
    Replaced { previous: u32 },
}

/// Resolution state of one cross reference.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Resolved(Arc<ContentEntry>),
    /// The target id is not (yet) registered.
    Unresolved(String),
}

/// A cross reference paired with its resolution against the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedReference {
    pub reference: CrossReference,
    pub resolution: Resolution,
}

impl ResolvedReference {
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }

    /// The resolved target, if present.
    pub fn target(&self) -> Option<&Arc<ContentEntry>> {
        match &self.resolution {
            Resolution::Resolved(entry) => Some(entry),
            Resolution::Unresolved(_) => None,
        }
    }
}

/// Point-in-time counts over the registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub entries: usize,
    pub tags: usize,
    pub references: usize,
}
