use regex::Regex;
use serde::{Deserialize, Serialize};

/// Vocabularies and switches for the validator.
///
/// Every field has a default, so a partial TOML table such as
///
/// ```toml
/// relationships = ["parent", "child", "related"]
/// warn_on_empty_key_terms = false
/// ```
///
/// deserializes into a complete configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Known cross-reference relationships. Others produce a warning.
    pub relationships: Vec<String>,
    /// Known content `type` values. Others produce a warning.
    pub content_types: Vec<String>,
    /// Known `status` values. Others produce a warning.
    pub statuses: Vec<String>,
    /// Known exam names in `examRelevance`. Others produce a warning.
    pub exam_types: Vec<String>,
    /// Whole-word, case-insensitive markers of unfinished text.
    pub placeholder_markers: Vec<String>,
    /// Warn when a level defines no key terms.
    pub warn_on_empty_key_terms: bool,
    /// A `bodyEs` shorter than this fraction of `bodyEn` is a partial
    /// translation.
    pub min_spanish_body_ratio: f64,
    /// Warn about values outside the vocabularies above.
    pub check_vocabulary: bool,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            relationships: strings(&[
                "parent",
                "child",
                "sibling",
                "related",
                "see-also",
                "prerequisite",
            ]),
            content_types: strings(&[
                "structure",
                "system",
                "pathway",
                "process",
                "condition",
                "concept",
                "topic",
            ]),
            statuses: strings(&["draft", "review", "published"]),
            exam_types: strings(&["usmle", "nbme", "shelf"]),
            placeholder_markers: strings(&["TODO", "FIXME", "placeholder"]),
            warn_on_empty_key_terms: true,
            min_spanish_body_ratio: 0.5,
            check_vocabulary: true,
        }
    }
}

impl ValidatorConfig {
    /// Returns `true` if `value` is in `vocabulary` (case-insensitive).
    pub fn knows(vocabulary: &[String], value: &str) -> bool {
        vocabulary.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// The placeholder markers as one whole-word, case-insensitive pattern.
    /// `None` when no marker is configured.
    pub fn placeholder_pattern(&self) -> Result<Option<Regex>, regex::Error> {
        let markers: Vec<String> = self
            .placeholder_markers
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(regex::escape)
            .collect();
        if markers.is_empty() {
            return Ok(None);
        }
        Regex::new(&format!(r"(?i)\b({})\b", markers.join("|"))).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_marker<'t>(config: &ValidatorConfig, text: &'t str) -> Option<&'t str> {
        let pattern = config.placeholder_pattern().unwrap()?;
        pattern.find(text).map(|m| m.as_str())
    }

    #[test]
    fn placeholder_needs_whole_word() {
        let config = ValidatorConfig::default();
        assert_eq!(first_marker(&config, "TODO: write this"), Some("TODO"));
        assert_eq!(first_marker(&config, "a Placeholder body"), Some("Placeholder"));
        assert_eq!(first_marker(&config, "todos los pacientes"), None);
        assert_eq!(first_marker(&config, "placeholders"), None);
        assert_eq!(first_marker(&config, ""), None);
    }

    #[test]
    fn markers_are_matched_literally() {
        let config = ValidatorConfig {
            placeholder_markers: vec!["TBD".into(), "a.b".into(), "  ".into()],
            ..ValidatorConfig::default()
        };
        assert_eq!(first_marker(&config, "value tbd"), Some("tbd"));
        assert_eq!(first_marker(&config, "see a.b here"), Some("a.b"));
        assert_eq!(first_marker(&config, "axb"), None);

        let none = ValidatorConfig {
            placeholder_markers: Vec::new(),
            ..ValidatorConfig::default()
        };
        assert!(none.placeholder_pattern().unwrap().is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ValidatorConfig = toml::from_str(
            r#"
            relationships = ["related"]
            check_vocabulary = false
            "#,
        )
        .unwrap();
        assert_eq!(config.relationships, vec!["related"]);
        assert!(!config.check_vocabulary);
        assert_eq!(config.statuses, ValidatorConfig::default().statuses);
    }

    #[test]
    fn vocabulary_is_case_insensitive() {
        let config = ValidatorConfig::default();
        assert!(ValidatorConfig::knows(&config.statuses, "Published"));
        assert!(!ValidatorConfig::knows(&config.statuses, "archived"));
    }
}
