use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use medu_registry::ContentStore;
use medu_types::{ContentEntry, KeyTerm, LevelContent, LevelNumber};

use crate::error::{QueryError, QueryResult};

/// One outgoing edge of an entry's cross-reference graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEdge {
    pub target_id: String,
    pub relationship: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether `target_id` is currently registered.
    pub resolved: bool,
}

/// Read-only accessors over a content store.
///
/// This is the surface downstream consumers (renderers, indexers) use; it
/// never mutates the store and exposes no adapter or validator detail.
#[derive(Clone)]
pub struct ContentQuery {
    store: Arc<dyn ContentStore>,
}

impl ContentQuery {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// The entry registered under `id`.
    pub fn get_content(&self, id: &str) -> QueryResult<Arc<ContentEntry>> {
        Ok(self.store.require(id)?)
    }

    /// One level of an entry. Fails if `level` is outside `1..=5`, the entry
    /// is absent, or the entry lacks that level.
    pub fn get_level(&self, id: &str, level: u8) -> QueryResult<LevelContent> {
        let number =
            LevelNumber::new(level).map_err(|_| QueryError::LevelOutOfRange { level })?;
        let entry = self.get_content(id)?;
        entry
            .level(number)
            .cloned()
            .ok_or_else(|| QueryError::LevelNotFound {
                id: id.to_string(),
                level,
            })
    }

    /// Key terms of one level, in declaration order.
    pub fn get_key_terms(&self, id: &str, level: u8) -> QueryResult<Vec<KeyTerm>> {
        Ok(self.get_level(id, level)?.key_terms)
    }

    /// Entries carrying `tag` (case-insensitive), in insertion order.
    pub fn find_by_tag(&self, tag: &str) -> QueryResult<Vec<Arc<ContentEntry>>> {
        let found = self.store.list_by_tag(tag)?;
        debug!(tag, matches = found.len(), "tag lookup");
        Ok(found)
    }

    /// Outgoing cross references of `id` with their resolution state.
    pub fn get_cross_reference_graph(&self, id: &str) -> QueryResult<Vec<ReferenceEdge>> {
        Ok(self
            .store
            .resolve_cross_references(id)?
            .into_iter()
            .map(|r| ReferenceEdge {
                resolved: r.is_resolved(),
                target_id: r.reference.target_id,
                relationship: r.reference.relationship,
                label: r.reference.label,
            })
            .collect())
    }

    /// Ids of entries that reference `id`.
    pub fn referenced_by(&self, id: &str) -> QueryResult<Vec<String>> {
        Ok(self.store.referenced_by(id)?)
    }

    /// All registered ids in insertion order.
    pub fn ids(&self) -> QueryResult<Vec<String>> {
        Ok(self.store.ids()?)
    }
}

impl std::fmt::Debug for ContentQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentQuery").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use medu_registry::InMemoryRegistry;
    use medu_types::{CrossReference, TagSet};

    use super::*;

    fn query() -> (Arc<InMemoryRegistry>, ContentQuery) {
        let registry = Arc::new(InMemoryRegistry::new());
        let mut primary = ContentEntry::minimal("primary", "Primary Survey");
        primary.tags = TagSet::from_topics(["trauma"]);
        let mut reference = CrossReference::new("secondary", "sibling");
        reference.label = Some("Secondary Survey".into());
        primary.cross_references.push(reference);
        registry.upsert(primary).unwrap();
        let query = ContentQuery::new(registry.clone());
        (registry, query)
    }

    #[test]
    fn get_content_and_not_found() {
        let (_, query) = query();
        assert_eq!(query.get_content("primary").unwrap().name, "Primary Survey");
        let err = query.get_content("nope").unwrap_err();
        assert_eq!(err, QueryError::NotFound { id: "nope".into() });
        assert!(err.is_not_found());
    }

    #[test]
    fn get_level_bounds() {
        let (_, query) = query();
        assert_eq!(query.get_level("primary", 3).unwrap().level, 3);
        assert_eq!(
            query.get_level("primary", 0).unwrap_err(),
            QueryError::LevelOutOfRange { level: 0 }
        );
        assert_eq!(
            query.get_level("primary", 6).unwrap_err(),
            QueryError::LevelOutOfRange { level: 6 }
        );
        assert!(query.get_level("nope", 1).unwrap_err().is_not_found());
    }

    #[test]
    fn key_terms_of_level() {
        let (_, query) = query();
        let terms = query.get_key_terms("primary", 2).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].term, "Primary Survey");
    }

    #[test]
    fn find_by_tag_is_case_insensitive() {
        let (_, query) = query();
        assert_eq!(query.find_by_tag("Trauma").unwrap().len(), 1);
        assert!(query.find_by_tag("cardiology").unwrap().is_empty());
    }

    #[test]
    fn graph_tracks_resolution() {
        let (registry, query) = query();
        let graph = query.get_cross_reference_graph("primary").unwrap();
        assert_eq!(
            graph,
            vec![ReferenceEdge {
                target_id: "secondary".into(),
                relationship: "sibling".into(),
                label: Some("Secondary Survey".into()),
                resolved: false,
            }]
        );
        registry
            .upsert(ContentEntry::minimal("secondary", "Secondary Survey"))
            .unwrap();
        assert!(query.get_cross_reference_graph("primary").unwrap()[0].resolved);
        assert_eq!(query.referenced_by("secondary").unwrap(), vec!["primary"]);
    }

    #[test]
    fn edges_serialize_camel_case() {
        let edge = ReferenceEdge {
            target_id: "b".into(),
            relationship: "related".into(),
            label: None,
            resolved: true,
        };
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["targetId"], "b");
        assert!(json.get("label").is_none());
    }
}
