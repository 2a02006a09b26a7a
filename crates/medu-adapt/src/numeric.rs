//! Adapter for the numeric-level shape.
//!
//! Levels are keyed `"1"`..`"5"`. Each level carries a `summary`, a long-form
//! `explanation` and `patientCounselingPoints`; some also carry
//! `clinicalNotes` (a string or a list). A `title` is optional and is
//! synthesized from the first sentence of `summary` when absent.

use serde_json::Value;
use tracing::debug;

use medu_types::{LevelContent, LevelNumber};

use crate::adapter::{Adapted, NormalizationNote, ShapeAdapter};
use crate::common;
use crate::error::{AdaptResult, EntryLocator};
use crate::fields::Fields;
use crate::shape::{level_key_style, raw_levels, sample_level, LevelKeyStyle, SourceShape};

/// Normalizes entries whose levels are keyed by bare numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumericLevelAdapter;

impl NumericLevelAdapter {
    pub fn new() -> Self {
        Self
    }

    fn level(
        level: &Fields<'_>,
        number: LevelNumber,
        notes: &mut Vec<NormalizationNote>,
    ) -> AdaptResult<LevelContent> {
        let summary = level.optional_str("summary")?;

        let title_primary = match (level.optional_str("title")?, &summary) {
            (Some(title), _) => title,
            (None, Some(summary)) => {
                notes.push(NormalizationNote::synthesized(
                    level.path_of("titlePrimary"),
                    "summary",
                ));
                common::title_from_summary(summary)
            }
            (None, None) => return Err(level.missing("title")),
        };

        let title_primary_es = match level.optional_str("titleEs")? {
            Some(title) => title,
            None => match level.optional_str("summaryEs")? {
                Some(summary_es) => {
                    notes.push(NormalizationNote::synthesized(
                        level.path_of("titlePrimaryEs"),
                        "summaryEs",
                    ));
                    common::title_from_summary(&summary_es)
                }
                None => {
                    notes.push(NormalizationNote::defaulted(level.path_of("titlePrimaryEs")));
                    String::new()
                }
            },
        };

        Ok(LevelContent {
            level: common::declared_level(level)?.unwrap_or(number.get()),
            title_primary,
            title_primary_es,
            summary,
            body_en: level.required_str("explanation")?,
            body_es: common::text_or_default(level, "explanationEs", "bodyEs", notes)?,
            key_terms: common::key_terms(level)?,
            analogies: level.string_list("analogies")?,
            examples: level.string_list("examples")?,
            counseling_notes: common::counseling_notes(level, notes)?,
            reading_level: level.optional_str("readingLevel")?,
        })
    }
}

impl ShapeAdapter for NumericLevelAdapter {
    fn shape(&self) -> SourceShape {
        SourceShape::NumericLevels
    }

    fn matches(&self, raw: &Value) -> bool {
        let Some(levels) = raw_levels(raw) else {
            return false;
        };
        if level_key_style(levels) != Some(LevelKeyStyle::Numeric) {
            return false;
        }
        sample_level(levels).is_some_and(|sample| {
            (sample.contains_key("summary") || sample.contains_key("explanation"))
                && !sample.contains_key("bodyEn")
        })
    }

    fn adapt(&self, raw: &Value, locator: &EntryLocator) -> AdaptResult<Adapted> {
        let root = Fields::of(raw, "", locator)?;
        let mut notes = Vec::new();
        let levels = common::collect_levels(&root, LevelKeyStyle::Numeric, &mut notes, Self::level)?;
        let entry = common::build_entry(&root, levels, &mut notes)?;
        debug!(
            id = %entry.id,
            levels = entry.levels.len(),
            notes = notes.len(),
            "adapted numeric-level entry"
        );
        Ok(Adapted {
            entry,
            shape: SourceShape::NumericLevels,
            notes,
        })
    }
}
