use std::path::Path;

use serde::{Deserialize, Serialize};

use medu_validate::ValidatorConfig;

use crate::error::{CorpusError, CorpusResult};

/// Configuration for a corpus build.
///
/// Loaded from TOML; every key is optional:
///
/// ```toml
/// warn_on_unversioned_change = true
///
/// [validator]
/// relationships = ["parent", "child", "related", "prerequisite"]
/// placeholder_markers = ["TODO", "FIXME", "TBD"]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Warn when a same-version republish carries different content.
    pub warn_on_unversioned_change: bool,
    pub validator: ValidatorConfig,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            warn_on_unversioned_change: true,
            validator: ValidatorConfig::default(),
        }
    }
}

impl CorpusConfig {
    pub fn from_toml_str(text: &str) -> CorpusResult<Self> {
        toml::from_str(text).map_err(|e| CorpusError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> CorpusResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> CorpusResult<String> {
        toml::to_string_pretty(self).map_err(|e| CorpusError::Serialization(e.to_string()))
    }
}
