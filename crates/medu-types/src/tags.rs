use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// How clinically important a topic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalRelevance {
    Low,
    Medium,
    High,
    Critical,
}

impl ClinicalRelevance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for ClinicalRelevance {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(TypeError::UnknownClinicalRelevance(s.to_string())),
        }
    }
}

impl fmt::Display for ClinicalRelevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board-exam relevance flags.
///
/// `other` holds exam names flagged in the source that are not one of the
/// known exams; the validator reports them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRelevance {
    #[serde(default)]
    pub usmle: bool,
    #[serde(default)]
    pub nbme: bool,
    #[serde(default)]
    pub shelf: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub other: BTreeSet<String>,
}

impl ExamRelevance {
    /// Returns `true` if no exam is flagged.
    pub fn is_empty(&self) -> bool {
        !self.usmle && !self.nbme && self.shelf.is_empty() && self.other.is_empty()
    }
}

/// Normalized tag set of an entry.
///
/// Both source tag styles (a structured record or a flat list of strings) end
/// up here. A flat list populates `topics` only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSet {
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(default)]
    pub systems: BTreeSet<String>,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_relevance: Option<ClinicalRelevance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_relevance: Option<ExamRelevance>,
}

impl TagSet {
    /// Build a tag set from a flat list of topic tags.
    pub fn from_topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Returns `true` if any free-text tag matches `tag` (case-insensitive).
    pub fn contains(&self, tag: &str) -> bool {
        let wanted = normalize_tag(tag);
        !wanted.is_empty() && self.free_text().any(|t| normalize_tag(t) == wanted)
    }

    /// All free-text tags: topics, then systems, then keywords.
    pub fn free_text(&self) -> impl Iterator<Item = &String> {
        self.topics
            .iter()
            .chain(self.systems.iter())
            .chain(self.keywords.iter())
    }

    /// Normalized keys under which this tag set is indexed.
    pub fn index_keys(&self) -> BTreeSet<String> {
        self.free_text()
            .map(|t| normalize_tag(t))
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Returns `true` if the set carries no tag and no relevance marker.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
            && self.systems.is_empty()
            && self.keywords.is_empty()
            && self.clinical_relevance.is_none()
            && self.exam_relevance.is_none()
    }
}

/// Canonical lookup form of a tag: trimmed and lowercased.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn contains_is_case_insensitive_across_groups() {
        let tags = TagSet {
            topics: ["Trauma".to_string()].into(),
            systems: ["all".to_string()].into(),
            keywords: ["ATLS".to_string()].into(),
            ..Default::default()
        };
        assert!(tags.contains("trauma"));
        assert!(tags.contains(" atls "));
        assert!(tags.contains("ALL"));
        assert!(!tags.contains("shock"));
        assert!(!tags.contains("   "));
    }

    #[test]
    fn index_keys_are_normalized_and_deduplicated() {
        let tags = TagSet {
            topics: ["Trauma".to_string()].into(),
            keywords: ["trauma".to_string(), "ABCDE".to_string()].into(),
            ..Default::default()
        };
        let keys: Vec<String> = tags.index_keys().into_iter().collect();
        assert_eq!(keys, vec!["abcde".to_string(), "trauma".to_string()]);
    }

    #[test]
    fn from_topics_fills_topics_only() {
        let tags = TagSet::from_topics(["latino-health", "patient-safety"]);
        assert_eq!(tags.topics.len(), 2);
        assert!(tags.systems.is_empty());
        assert!(tags.clinical_relevance.is_none());
    }

    #[test]
    fn clinical_relevance_parse() {
        assert_eq!(
            "Critical".parse::<ClinicalRelevance>().unwrap(),
            ClinicalRelevance::Critical
        );
        assert_eq!(
            "urgent".parse::<ClinicalRelevance>(),
            Err(TypeError::UnknownClinicalRelevance("urgent".into()))
        );
    }

    #[test]
    fn empty_exam_relevance() {
        assert!(ExamRelevance::default().is_empty());
        let exam = ExamRelevance {
            shelf: vec!["surgery".into()],
            ..Default::default()
        };
        assert!(!exam.is_empty());
    }

    #[test]
    fn serde_uses_camel_case() {
        let tags = TagSet {
            clinical_relevance: Some(ClinicalRelevance::High),
            ..Default::default()
        };
        let json = serde_json::to_value(&tags).unwrap();
        assert_eq!(json["clinicalRelevance"], "high");
        assert!(json.get("examRelevance").is_none());
    }

    proptest! {
        #[test]
        fn tag_lookup_ignores_case_and_padding(tag in "[A-Za-z][A-Za-z-]{0,15}") {
            let tags = TagSet::from_topics([format!("  {tag} ")]);
            prop_assert!(tags.contains(&tag.to_uppercase()));
            prop_assert!(tags.contains(&tag.to_lowercase()));
            prop_assert_eq!(normalize_tag(&normalize_tag(&tag)), normalize_tag(&tag));
        }
    }
}
