//! Field mapping shared by the numeric-level and string-level adapters.
//!
//! Both source shapes agree on the entry envelope (id, names, media,
//! citations, cross references, tags, metadata); they differ only in how
//! levels are keyed and named. The per-shape adapters build the level map and
//! hand it to [`build_entry`].

use std::collections::BTreeMap;

use serde_json::Value;

use medu_types::{
    Citation, ClinicalRelevance, ContentEntry, CounselingNote, CrossReference, ExamRelevance,
    KeyTerm, LevelContent, LevelNumber, MediaRef, TagSet,
};

use crate::adapter::NormalizationNote;
use crate::error::AdaptResult;
use crate::fields::{type_name, Fields};
use crate::shape::LevelKeyStyle;

/// Longest title synthesized from a summary, in characters.
const MAX_SYNTHESIZED_TITLE: usize = 120;

const MEDIA_FIELDS: &[&str] = &["id", "type", "filename", "title", "description"];
const KNOWN_EXAMS: &[&str] = &["usmle", "nbme", "shelf"];

/// Assemble the canonical entry around an already adapted level map.
pub(crate) fn build_entry(
    root: &Fields<'_>,
    levels: BTreeMap<LevelNumber, LevelContent>,
    notes: &mut Vec<NormalizationNote>,
) -> AdaptResult<ContentEntry> {
    let name_es = match root.optional_str("nameEs")? {
        Some(name_es) => name_es,
        None => {
            notes.push(NormalizationNote::defaulted("nameEs"));
            String::new()
        }
    };
    for field in ["media", "citations", "crossReferences"] {
        if !root.has(field) {
            notes.push(NormalizationNote::defaulted(field));
        }
    }

    Ok(ContentEntry {
        id: root.required_str("id")?,
        content_type: root.required_str("type")?,
        name: root.required_str("name")?,
        name_es,
        alternate_names: root.string_list("alternateNames")?,
        levels,
        media: media(root)?,
        citations: citations(root)?,
        cross_references: cross_references(root, notes)?,
        tags: tags(root, notes)?,
        created_at: root.required_timestamp("createdAt")?,
        updated_at: root.required_timestamp("updatedAt")?,
        version: root.required_u32("version")?,
        status: root.required_str("status")?.into(),
    })
}

fn media(root: &Fields<'_>) -> AdaptResult<Vec<MediaRef>> {
    let locator = root.locator();
    root.array("media")?
        .iter()
        .map(|node| {
            let item = node.fields(locator)?;
            Ok(MediaRef {
                id: item.required_str("id")?,
                kind: item.required_str("type")?,
                filename: item.required_str("filename")?,
                title: item.optional_str("title")?.unwrap_or_default(),
                description: item.optional_str("description")?.unwrap_or_default(),
                extra: item.other_fields(MEDIA_FIELDS),
            })
        })
        .collect()
}

fn citations(root: &Fields<'_>) -> AdaptResult<Vec<Citation>> {
    let locator = root.locator();
    root.array("citations")?
        .iter()
        .map(|node| {
            let item = node.fields(locator)?;
            Ok(Citation {
                id: item.required_str("id")?,
                kind: item.required_str("type")?,
                title: item.required_str("title")?,
                authors: item.string_list("authors")?,
                source: item.optional_str("source")?.unwrap_or_default(),
                url: item.optional_str("url")?,
                year: item.optional_i32("year")?,
                accessed_date: item.optional_str("accessedDate")?,
            })
        })
        .collect()
}

fn cross_references(
    root: &Fields<'_>,
    notes: &mut Vec<NormalizationNote>,
) -> AdaptResult<Vec<CrossReference>> {
    let locator = root.locator();
    let mut references = Vec::new();
    for node in root.array("crossReferences")? {
        let item = node.fields(locator)?;
        let target_id = match item.optional_str("targetId")? {
            Some(id) => id,
            None => {
                let id = item
                    .optional_str("contentId")?
                    .ok_or_else(|| item.missing("targetId"))?;
                notes.push(NormalizationNote::renamed(
                    item.path_of("targetId"),
                    "contentId",
                ));
                id
            }
        };
        references.push(CrossReference {
            target_id,
            target_type: item.optional_str("targetType")?,
            relationship: item.required_str("relationship")?,
            label: item.optional_str("label")?,
        });
    }
    Ok(references)
}

fn tags(root: &Fields<'_>, notes: &mut Vec<NormalizationNote>) -> AdaptResult<TagSet> {
    let Some(node) = root.node("tags") else {
        notes.push(NormalizationNote::defaulted("tags"));
        return Ok(TagSet::default());
    };
    match node.value {
        Value::Array(_) => Ok(TagSet::from_topics(root.string_list("tags")?)),
        Value::Object(_) => {
            let record = node.fields(root.locator())?;
            let clinical_relevance = record
                .optional_str("clinicalRelevance")?
                .map(|s| {
                    s.parse::<ClinicalRelevance>()
                        .map_err(|e| record.malformed("clinicalRelevance", e.to_string()))
                })
                .transpose()?;
            let exam_relevance = match record.node("examRelevance") {
                Some(exam) => Some(exam_relevance(&exam.fields(root.locator())?)?),
                None => None,
            };
            Ok(TagSet {
                topics: record.string_list("topics")?.into_iter().collect(),
                systems: record.string_list("systems")?.into_iter().collect(),
                keywords: record.string_list("keywords")?.into_iter().collect(),
                clinical_relevance,
                exam_relevance,
            })
        }
        other => Err(root.malformed(
            "tags",
            format!("expected array or object, got {}", type_name(other)),
        )),
    }
}

fn exam_relevance(exam: &Fields<'_>) -> AdaptResult<ExamRelevance> {
    let other = exam
        .other_fields(KNOWN_EXAMS)
        .into_iter()
        .filter(|(_, flag)| flag.as_bool() != Some(false))
        .map(|(name, _)| name)
        .collect();
    Ok(ExamRelevance {
        usmle: exam.optional_bool("usmle")?.unwrap_or(false),
        nbme: exam.optional_bool("nbme")?.unwrap_or(false),
        shelf: exam.string_list("shelf")?,
        other,
    })
}

// ---------------------------------------------------------------------------
// Level helpers
// ---------------------------------------------------------------------------

/// Walk the raw `levels` object, converting each level with `convert`.
///
/// Keys must all follow `style` and name a level in `1..=5`; completeness is
/// left to the validator.
pub(crate) fn collect_levels<F>(
    root: &Fields<'_>,
    style: LevelKeyStyle,
    notes: &mut Vec<NormalizationNote>,
    mut convert: F,
) -> AdaptResult<BTreeMap<LevelNumber, LevelContent>>
where
    F: FnMut(&Fields<'_>, LevelNumber, &mut Vec<NormalizationNote>) -> AdaptResult<LevelContent>,
{
    let node = root.node("levels").ok_or_else(|| root.missing("levels"))?;
    let levels = node.fields(root.locator())?;
    let mut out = BTreeMap::new();
    for key in levels.keys() {
        let number = style
            .parse(key)
            .ok_or_else(|| levels.malformed(key, format!("unexpected level key style `{key}`")))?;
        let number = LevelNumber::from_i64(number).map_err(|e| levels.malformed(key, e.to_string()))?;
        let Some(level_node) = levels.node(key) else {
            continue;
        };
        if out.contains_key(&number) {
            return Err(levels.malformed(key, format!("duplicate level {number}")));
        }
        let level = level_node.fields(root.locator())?;
        out.insert(number, convert(&level, number, notes)?);
    }
    Ok(out)
}

pub(crate) fn key_terms(level: &Fields<'_>) -> AdaptResult<Vec<KeyTerm>> {
    let locator = level.locator();
    level
        .array("keyTerms")?
        .iter()
        .map(|node| {
            let item = node.fields(locator)?;
            Ok(KeyTerm {
                term: item.required_str("term")?,
                definition: item.required_str("definition")?,
                pronunciation: pronunciation(&item)?,
            })
        })
        .collect()
}

/// Pronunciation is either a plain respelling or an object carrying
/// `simplified` and/or `ipa`; the simplified respelling wins.
fn pronunciation(term: &Fields<'_>) -> AdaptResult<Option<String>> {
    let Some(node) = term.node("pronunciation") else {
        return Ok(None);
    };
    match node.value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Object(_) => {
            let detail = node.fields(term.locator())?;
            match detail.optional_str("simplified")? {
                Some(simplified) => Ok(Some(simplified)),
                None => detail.optional_str("ipa"),
            }
        }
        other => Err(term.malformed(
            "pronunciation",
            format!("expected string or object, got {}", type_name(other)),
        )),
    }
}

/// Merge `patientCounselingPoints` and `clinicalNotes` into one tagged list,
/// patient notes first.
pub(crate) fn counseling_notes(
    level: &Fields<'_>,
    notes: &mut Vec<NormalizationNote>,
) -> AdaptResult<Vec<CounselingNote>> {
    let patient = level.string_list("patientCounselingPoints")?;
    let clinical = level.string_list("clinicalNotes")?;
    if !level.has("patientCounselingPoints") && !level.has("clinicalNotes") {
        notes.push(NormalizationNote::defaulted(
            level.path_of("counselingNotes"),
        ));
    }
    Ok(patient
        .into_iter()
        .map(CounselingNote::patient)
        .chain(clinical.into_iter().map(CounselingNote::clinical))
        .collect())
}

/// Optional string field that defaults to empty with a note.
pub(crate) fn text_or_default(
    level: &Fields<'_>,
    key: &str,
    canonical: &str,
    notes: &mut Vec<NormalizationNote>,
) -> AdaptResult<String> {
    match level.optional_str(key)? {
        Some(text) => Ok(text),
        None => {
            notes.push(NormalizationNote::defaulted(level.path_of(canonical)));
            Ok(String::new())
        }
    }
}

/// Explicit `level` field of a raw level, if given; must be an integer.
pub(crate) fn declared_level(level: &Fields<'_>) -> AdaptResult<Option<u8>> {
    match level.get("level") {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| level.malformed("level", format!("expected small integer, got {value}"))),
    }
}

/// Derive a level title from the first sentence of a summary.
pub(crate) fn title_from_summary(summary: &str) -> String {
    let text = summary.trim();
    let end = text
        .char_indices()
        .find(|&(i, c)| {
            matches!(c, '.' | '!' | '?')
                && text[i + c.len_utf8()..].starts_with(char::is_whitespace)
        })
        .map_or(text.len(), |(i, _)| i);
    let sentence = text[..end].trim_end_matches(['.', '!', '?']).trim();
    truncate_at_word(sentence, MAX_SYNTHESIZED_TITLE)
}

fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let head = match cut.rfind(char::is_whitespace) {
        Some(i) => cut[..i].trim_end(),
        None => cut.as_str(),
    };
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::EntryLocator;

    use super::*;

    #[test]
    fn title_is_first_sentence() {
        assert_eq!(
            title_from_summary(
                "The primary survey is a fast check. We check Airway, Breathing."
            ),
            "The primary survey is a fast check"
        );
        assert_eq!(title_from_summary("  Single sentence.  "), "Single sentence");
        assert_eq!(title_from_summary("No punctuation"), "No punctuation");
    }

    #[test]
    fn title_keeps_inline_periods() {
        assert_eq!(
            title_from_summary("Dose is 0.5 mg daily. Then more."),
            "Dose is 0.5 mg daily"
        );
    }

    #[test]
    fn long_titles_truncate_on_word_boundary() {
        let summary = "word ".repeat(60);
        let title = title_from_summary(&summary);
        assert!(title.ends_with('…'));
        assert!(title.chars().count() <= MAX_SYNTHESIZED_TITLE + 1);
        assert!(!title.contains("wor…"));
    }

    #[test]
    fn structured_tags_normalize() {
        let raw = json!({"tags": {
            "systems": ["all"],
            "topics": ["trauma"],
            "keywords": ["ATLS"],
            "clinicalRelevance": "critical",
            "examRelevance": {"usmle": true, "nbme": false, "shelf": ["surgery"], "comlex": true}
        }});
        let loc = EntryLocator::Index(0);
        let root = Fields::of(&raw, "", &loc).unwrap();
        let mut notes = Vec::new();
        let tags = tags(&root, &mut notes).unwrap();
        assert!(tags.contains("atls"));
        assert_eq!(tags.clinical_relevance, Some(ClinicalRelevance::Critical));
        let exam = tags.exam_relevance.unwrap();
        assert!(exam.usmle && !exam.nbme);
        assert_eq!(exam.shelf, vec!["surgery"]);
        assert!(exam.other.contains("comlex"));
        assert!(notes.is_empty());
    }

    #[test]
    fn flat_tags_become_topics() {
        let raw = json!({"tags": ["latino-health", "patient-safety"]});
        let loc = EntryLocator::Index(0);
        let root = Fields::of(&raw, "", &loc).unwrap();
        let tags = tags(&root, &mut Vec::new()).unwrap();
        assert_eq!(tags.topics.len(), 2);
        assert!(tags.clinical_relevance.is_none());
    }

    #[test]
    fn unknown_clinical_relevance_is_malformed() {
        let raw = json!({"tags": {"clinicalRelevance": "urgent"}});
        let loc = EntryLocator::Index(0);
        let root = Fields::of(&raw, "", &loc).unwrap();
        let err = tags(&root, &mut Vec::new()).unwrap_err();
        assert_eq!(err.path(), Some("tags.clinicalRelevance"));
    }

    #[test]
    fn legacy_content_id_is_renamed() {
        let raw = json!({"crossReferences": [
            {"contentId": "topic-b", "relationship": "prerequisite"}
        ]});
        let loc = EntryLocator::Index(0);
        let root = Fields::of(&raw, "", &loc).unwrap();
        let mut notes = Vec::new();
        let refs = cross_references(&root, &mut notes).unwrap();
        assert_eq!(refs[0].target_id, "topic-b");
        assert!(refs[0].target_type.is_none());
        assert_eq!(
            notes,
            vec![NormalizationNote::renamed(
                "crossReferences[0].targetId",
                "contentId"
            )]
        );
    }

    #[test]
    fn cross_reference_without_target_is_missing() {
        let raw = json!({"crossReferences": [{"relationship": "related"}]});
        let loc = EntryLocator::Index(0);
        let root = Fields::of(&raw, "", &loc).unwrap();
        let err = cross_references(&root, &mut Vec::new()).unwrap_err();
        assert_eq!(err.path(), Some("crossReferences[0].targetId"));
    }

    #[test]
    fn pronunciation_object_prefers_simplified() {
        let raw = json!({"keyTerms": [
            {"term": "a", "definition": "b", "pronunciation": {"ipa": "/x/", "simplified": "ex"}},
            {"term": "c", "definition": "d", "pronunciation": {"ipa": "/y/"}},
            {"term": "e", "definition": "f", "pronunciation": "EE"}
        ]});
        let loc = EntryLocator::Index(0);
        let root = Fields::of(&raw, "", &loc).unwrap();
        let terms = key_terms(&root).unwrap();
        let spoken: Vec<Option<&str>> = terms.iter().map(|t| t.pronunciation.as_deref()).collect();
        assert_eq!(spoken, vec![Some("ex"), Some("/y/"), Some("EE")]);
    }

    #[test]
    fn counseling_merges_patient_then_clinical() {
        let raw = json!({
            "patientCounselingPoints": ["p1", "p2"],
            "clinicalNotes": "c1"
        });
        let loc = EntryLocator::Index(0);
        let level = Fields::of(&raw, "levels.1", &loc).unwrap();
        let mut notes = Vec::new();
        let merged = counseling_notes(&level, &mut notes).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2], CounselingNote::clinical("c1"));
        assert!(notes.is_empty());
    }

    #[test]
    fn absent_counseling_is_noted() {
        let raw = json!({});
        let loc = EntryLocator::Index(0);
        let level = Fields::of(&raw, "levels.2", &loc).unwrap();
        let mut notes = Vec::new();
        assert!(counseling_notes(&level, &mut notes).unwrap().is_empty());
        assert_eq!(
            notes,
            vec![NormalizationNote::defaulted("levels.2.counselingNotes")]
        );
    }
}
