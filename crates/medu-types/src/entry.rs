use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::digest::ContentDigest;
use crate::error::TypeError;
use crate::level::LevelNumber;
use crate::tags::TagSet;

// ---------------------------------------------------------------------------
// ContentEntry
// ---------------------------------------------------------------------------

/// One unit of educational content in canonical form.
///
/// Entries are immutable once built: a republish is a new entry with the same
/// `id` and a higher `version`, never an in-place edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// Globally unique, stable identifier.
    pub id: String,
    /// Open category tag (`topic`, `condition`, ...).
    #[serde(rename = "type")]
    pub content_type: String,
    pub name: String,
    /// Spanish display name; empty when the source has none.
    #[serde(default)]
    pub name_es: String,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    pub levels: BTreeMap<LevelNumber, LevelContent>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
    #[serde(default)]
    pub tags: TagSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u32,
    pub status: ContentStatus,
}

impl ContentEntry {
    /// Create a complete, valid entry with placeholder-free filler content.
    ///
    /// Every level is populated in both languages, so the result passes
    /// per-entry validation. Intended for tests and embedding.
    pub fn minimal(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let created = DateTime::<Utc>::from_timestamp(1_767_225_600, 0).unwrap_or_default();
        let levels = LevelNumber::ALL
            .iter()
            .map(|&level| (level, LevelContent::minimal(level, &name)))
            .collect();
        Self {
            id: id.into(),
            content_type: "topic".into(),
            name_es: format!("{name} (es)"),
            name,
            alternate_names: Vec::new(),
            levels,
            media: Vec::new(),
            citations: Vec::new(),
            cross_references: Vec::new(),
            tags: TagSet::default(),
            created_at: created,
            updated_at: created,
            version: 1,
            status: ContentStatus::Published,
        }
    }

    /// Content of a single level, if present.
    pub fn level(&self, level: LevelNumber) -> Option<&LevelContent> {
        self.levels.get(&level)
    }

    /// Levels in `1..=5` that are absent from `levels`.
    pub fn missing_levels(&self) -> Vec<LevelNumber> {
        LevelNumber::ALL
            .iter()
            .copied()
            .filter(|l| !self.levels.contains_key(l))
            .collect()
    }

    /// Returns `true` if all five levels are present.
    pub fn has_complete_levels(&self) -> bool {
        self.missing_levels().is_empty()
    }

    /// Returns `true` if the entry carries a Spanish display name.
    pub fn has_spanish_name(&self) -> bool {
        !self.name_es.trim().is_empty()
    }

    /// Ids of every cross-reference target, in declaration order.
    pub fn target_ids(&self) -> impl Iterator<Item = &str> {
        self.cross_references.iter().map(|r| r.target_id.as_str())
    }

    /// BLAKE3 digest of the canonical JSON form.
    pub fn digest(&self) -> Result<ContentDigest, TypeError> {
        ContentDigest::of_entry(self)
    }
}

// ---------------------------------------------------------------------------
// LevelContent
// ---------------------------------------------------------------------------

/// Bilingual payload of one complexity level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelContent {
    /// Must equal the key under which this level is stored.
    pub level: u8,
    pub title_primary: String,
    #[serde(default)]
    pub title_primary_es: String,
    /// One-paragraph summary, when the source shape has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub body_en: String,
    /// May be shorter than `body_en` or empty (partial translation).
    #[serde(default)]
    pub body_es: String,
    #[serde(default)]
    pub key_terms: Vec<KeyTerm>,
    #[serde(default)]
    pub analogies: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub counseling_notes: Vec<CounselingNote>,
    /// Advisory reading-level descriptor, e.g. "8th-grade".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_level: Option<String>,
}

impl LevelContent {
    /// A fully translated level with one key term and one counseling note.
    pub fn minimal(level: LevelNumber, topic: &str) -> Self {
        Self {
            level: level.get(),
            title_primary: format!("{topic}: level {level}"),
            title_primary_es: format!("{topic}: nivel {level}"),
            summary: None,
            body_en: format!("About {topic} at level {level}."),
            body_es: format!("Sobre {topic} en el nivel {level}."),
            key_terms: vec![KeyTerm::new(topic, format!("Definition of {topic}"))],
            analogies: Vec::new(),
            examples: Vec::new(),
            counseling_notes: vec![CounselingNote::patient(format!(
                "Ask your doctor about {topic}."
            ))],
            reading_level: None,
        }
    }

    /// Returns `true` if a Spanish body is present.
    pub fn has_spanish_body(&self) -> bool {
        !self.body_es.trim().is_empty()
    }

    /// Length of `bodyEs` over `bodyEn`, in characters. `None` when the
    /// English body is empty.
    pub fn spanish_body_ratio(&self) -> Option<f64> {
        let en = self.body_en.trim().chars().count();
        let es = self.body_es.trim().chars().count();
        (en > 0).then(|| es as f64 / en as f64)
    }

    /// A Spanish body is present but shorter than `min_ratio` of the English
    /// one.
    pub fn has_partial_spanish_body(&self, min_ratio: f64) -> bool {
        self.has_spanish_body() && self.spanish_body_ratio().is_some_and(|r| r < min_ratio)
    }

    /// Counseling notes of one kind, in order.
    pub fn counseling(&self, kind: CounselingKind) -> impl Iterator<Item = &str> {
        self.counseling_notes
            .iter()
            .filter(move |n| n.kind == kind)
            .map(|n| n.text.as_str())
    }
}

/// A glossary term introduced at a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyTerm {
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
}

impl KeyTerm {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            pronunciation: None,
        }
    }

    /// Comparison key for uniqueness checks: trimmed and lowercased.
    pub fn normalized_term(&self) -> String {
        self.term.trim().to_lowercase()
    }
}

/// Audience of a counseling note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounselingKind {
    /// Advice addressed to the patient.
    Patient,
    /// Notes addressed to the clinician.
    Clinical,
}

/// A single counseling point, tagged with its audience.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounselingNote {
    pub kind: CounselingKind,
    pub text: String,
}

impl CounselingNote {
    pub fn patient(text: impl Into<String>) -> Self {
        Self {
            kind: CounselingKind::Patient,
            text: text.into(),
        }
    }

    pub fn clinical(text: impl Into<String>) -> Self {
        Self {
            kind: CounselingKind::Clinical,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// Media attachment. Opaque to this layer apart from `id` uniqueness.
///
/// Source fields beyond the named ones (e.g. `license`) are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub filename: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Bibliographic citation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessed_date: Option<String>,
}

/// Directed link to another entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReference {
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    pub relationship: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CrossReference {
    pub fn new(target_id: impl Into<String>, relationship: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            target_type: None,
            relationship: relationship.into(),
            label: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ContentStatus
// ---------------------------------------------------------------------------

/// Publication status. Open to extension: unknown values survive as `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentStatus {
    Draft,
    Review,
    Published,
    Other(String),
}

impl ContentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Published => "published",
            Self::Other(s) => s,
        }
    }

    /// Returns `true` for the built-in statuses.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ContentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "draft" => Self::Draft,
            "review" => Self::Review,
            "published" => Self::Published,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ContentStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ContentStatus> for String {
    fn from(status: ContentStatus) -> Self {
        match status {
            ContentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
