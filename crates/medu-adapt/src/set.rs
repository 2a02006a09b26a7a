use serde_json::Value;
use tracing::debug;

use crate::adapter::{Adapted, ShapeAdapter};
use crate::canonical::CanonicalAdapter;
use crate::error::{AdaptError, AdaptResult, EntryLocator};
use crate::numeric::NumericLevelAdapter;
use crate::string_level::StringLevelAdapter;

// ---------------------------------------------------------------------------
// AdapterSet
// ---------------------------------------------------------------------------

/// An explicit, ordered set of shape adapters behind one detection function.
///
/// Detection asks every adapter whether it claims the raw object. Exactly one
/// claim selects that adapter; zero or several claims fail closed with
/// [`AdaptError::ShapeUnrecognized`]. Adding a shape is adding an adapter.
pub struct AdapterSet {
    adapters: Vec<Box<dyn ShapeAdapter>>,
}

impl AdapterSet {
    /// An empty set. Use [`Self::add_adapter`] or
    /// [`Self::with_default_adapters`].
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// The built-in adapters: numeric levels, string levels, canonical.
    pub fn with_default_adapters() -> Self {
        let mut set = Self::new();
        set.add_adapter(Box::new(NumericLevelAdapter));
        set.add_adapter(Box::new(StringLevelAdapter));
        set.add_adapter(Box::new(CanonicalAdapter));
        set
    }

    pub fn add_adapter(&mut self, adapter: Box<dyn ShapeAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Select the single adapter that claims `raw`.
    pub fn detect(&self, raw: &Value, locator: &EntryLocator) -> AdaptResult<&dyn ShapeAdapter> {
        let claims: Vec<&dyn ShapeAdapter> = self
            .adapters
            .iter()
            .map(|a| a.as_ref())
            .filter(|a| a.matches(raw))
            .collect();
        match claims.as_slice() {
            [only] => Ok(*only),
            [] => Err(AdaptError::ShapeUnrecognized {
                locator: locator.clone(),
                reason: unrecognized_reason(raw),
            }),
            several => {
                let names: Vec<&str> = several.iter().map(|a| a.shape().as_str()).collect();
                Err(AdaptError::ShapeUnrecognized {
                    locator: locator.clone(),
                    reason: format!("ambiguous: claimed by {}", names.join(", ")),
                })
            }
        }
    }

    /// Detect the shape of `raw` and normalize it.
    pub fn adapt(&self, raw: &Value, locator: &EntryLocator) -> AdaptResult<Adapted> {
        let adapter = self.detect(raw, locator)?;
        debug!(entry = %locator, shape = %adapter.shape(), "shape detected");
        adapter.adapt(raw, locator)
    }

    /// Like [`Self::adapt`], locating the entry by its id or else by `index`.
    pub fn adapt_at(&self, raw: &Value, index: usize) -> AdaptResult<Adapted> {
        self.adapt(raw, &EntryLocator::of(raw, index))
    }
}

impl Default for AdapterSet {
    fn default() -> Self {
        Self::with_default_adapters()
    }
}

fn unrecognized_reason(raw: &Value) -> String {
    match raw.get("levels") {
        None => "no `levels` field".to_string(),
        Some(Value::Object(map)) if map.is_empty() => "`levels` is empty".to_string(),
        Some(Value::Object(_)) => "no known shape matches the level keys and fields".to_string(),
        Some(_) => "`levels` is not an object".to_string(),
    }
}

/// Normalize `raw` with the built-in adapters.
pub fn adapt(raw: &Value, index: usize) -> AdaptResult<Adapted> {
    AdapterSet::with_default_adapters().adapt_at(raw, index)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{json, Value};

    use super::*;
    use crate::shape::SourceShape;

    fn numeric(id: &str, terms: &[String]) -> Value {
        let key_terms: Vec<Value> = terms
            .iter()
            .map(|t| json!({"term": t, "definition": format!("meaning of {t}")}))
            .collect();
        let levels: serde_json::Map<String, Value> = (1..=5)
            .map(|n| {
                (
                    n.to_string(),
                    json!({
                        "level": n,
                        "summary": format!("Summary {n}. More."),
                        "explanation": format!("Body {n}"),
                        "keyTerms": key_terms,
                        "patientCounselingPoints": ["point"],
                    }),
                )
            })
            .collect();
        json!({
            "id": id, "type": "topic", "name": "Name", "nameEs": "Nombre",
            "levels": levels,
            "tags": ["a"],
            "createdAt": "2025-01-01", "updatedAt": "2025-01-02",
            "version": 1, "status": "published"
        })
    }

    struct AlwaysClaims;

    impl ShapeAdapter for AlwaysClaims {
        fn shape(&self) -> SourceShape {
            SourceShape::Canonical
        }

        fn matches(&self, _raw: &Value) -> bool {
            true
        }

        fn adapt(&self, _raw: &Value, locator: &EntryLocator) -> AdaptResult<Adapted> {
            Err(AdaptError::MissingField {
                locator: locator.clone(),
                path: "id".into(),
            })
        }
    }

    #[test]
    fn default_set_has_three_adapters() {
        assert_eq!(AdapterSet::default().len(), 3);
        assert!(AdapterSet::new().is_empty());
    }

    #[test]
    fn detects_each_shape() {
        let set = AdapterSet::with_default_adapters();
        let raw = numeric("topic-a", &["x".into()]);
        assert_eq!(set.adapt_at(&raw, 0).unwrap().shape, SourceShape::NumericLevels);

        let canonical = serde_json::to_value(set.adapt_at(&raw, 0).unwrap().entry).unwrap();
        assert_eq!(
            set.adapt_at(&canonical, 0).unwrap().shape,
            SourceShape::Canonical
        );
    }

    #[test]
    fn unknown_shape_fails_closed() {
        let raw = json!({"id": "odd", "levels": {"one": {"text": "?"}}});
        let err = adapt(&raw, 4).unwrap_err();
        assert!(err.is_shape_unrecognized());
        assert_eq!(err.locator(), &EntryLocator::Id("odd".into()));

        let err = adapt(&json!({"name": "no levels"}), 4).unwrap_err();
        assert_eq!(err.locator(), &EntryLocator::Index(4));
        assert!(err.to_string().contains("no `levels` field"));
    }

    #[test]
    fn ambiguity_fails_closed() {
        let mut set = AdapterSet::with_default_adapters();
        set.add_adapter(Box::new(AlwaysClaims));
        let err = set.adapt_at(&numeric("topic-a", &[]), 0).unwrap_err();
        assert!(err.is_shape_unrecognized());
        assert!(err.to_string().contains("ambiguous"));
    }

    proptest! {
        #[test]
        fn adaptation_is_deterministic_and_idempotent(
            id in "[a-z]{1,8}(-[a-z]{1,8}){0,3}",
            terms in proptest::collection::vec("[A-Za-z]{1,10}", 0..4),
        ) {
            let raw = numeric(&id, &terms);
            let first = adapt(&raw, 0).unwrap();
            let second = adapt(&raw, 0).unwrap();
            prop_assert_eq!(&first, &second);

            let serialized = serde_json::to_value(&first.entry).unwrap();
            let reloaded = adapt(&serialized, 0).unwrap();
            prop_assert_eq!(reloaded.shape, SourceShape::Canonical);
            prop_assert_eq!(reloaded.entry, first.entry);
        }
    }
}
