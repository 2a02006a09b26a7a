use serde_json::Value;
use tracing::debug;

use medu_types::ContentEntry;

use crate::adapter::{Adapted, ShapeAdapter};
use crate::error::{AdaptError, AdaptResult, EntryLocator};
use crate::shape::{level_key_style, raw_levels, sample_level, LevelKeyStyle, SourceShape};

/// Accepts entries that are already in canonical form, such as a previous
/// normalized export. Deserializes without any field mapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalAdapter;

impl CanonicalAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ShapeAdapter for CanonicalAdapter {
    fn shape(&self) -> SourceShape {
        SourceShape::Canonical
    }

    fn matches(&self, raw: &Value) -> bool {
        let Some(levels) = raw_levels(raw) else {
            return false;
        };
        level_key_style(levels) == Some(LevelKeyStyle::Numeric)
            && sample_level(levels).is_some_and(|sample| sample.contains_key("bodyEn"))
    }

    fn adapt(&self, raw: &Value, locator: &EntryLocator) -> AdaptResult<Adapted> {
        let entry: ContentEntry =
            serde_json::from_value(raw.clone()).map_err(|e| AdaptError::Malformed {
                locator: locator.clone(),
                path: String::new(),
                reason: e.to_string(),
            })?;
        debug!(id = %entry.id, "accepted canonical entry");
        Ok(Adapted {
            entry,
            shape: SourceShape::Canonical,
            notes: Vec::new(),
        })
    }
}
