//! Adapter for the string-level shape.
//!
//! Levels are keyed `"level1"`..`"level5"` and carry `title`/`titleEs`,
//! `content`/`contentEs`, a `readingLevel` descriptor and `clinicalNotes`.
//! There is no `summary`; cross references use the legacy `contentId` key
//! and tags are a flat list.

use serde_json::Value;
use tracing::debug;

use medu_types::{LevelContent, LevelNumber};

use crate::adapter::{Adapted, NormalizationNote, ShapeAdapter};
use crate::common;
use crate::error::{AdaptResult, EntryLocator};
use crate::fields::Fields;
use crate::shape::{level_key_style, raw_levels, sample_level, LevelKeyStyle, SourceShape};

/// Normalizes entries whose levels are keyed `levelN`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringLevelAdapter;

impl StringLevelAdapter {
    pub fn new() -> Self {
        Self
    }

    fn level(
        level: &Fields<'_>,
        number: LevelNumber,
        notes: &mut Vec<NormalizationNote>,
    ) -> AdaptResult<LevelContent> {
        Ok(LevelContent {
            level: common::declared_level(level)?.unwrap_or(number.get()),
            title_primary: level.required_str("title")?,
            title_primary_es: common::text_or_default(level, "titleEs", "titlePrimaryEs", notes)?,
            summary: level.optional_str("summary")?,
            body_en: level.required_str("content")?,
            body_es: common::text_or_default(level, "contentEs", "bodyEs", notes)?,
            key_terms: common::key_terms(level)?,
            analogies: level.string_list("analogies")?,
            examples: level.string_list("examples")?,
            counseling_notes: common::counseling_notes(level, notes)?,
            reading_level: level.optional_str("readingLevel")?,
        })
    }
}

impl ShapeAdapter for StringLevelAdapter {
    fn shape(&self) -> SourceShape {
        SourceShape::StringLevels
    }

    fn matches(&self, raw: &Value) -> bool {
        let Some(levels) = raw_levels(raw) else {
            return false;
        };
        if level_key_style(levels) != Some(LevelKeyStyle::Prefixed) {
            return false;
        }
        sample_level(levels).is_some_and(|sample| {
            (sample.contains_key("title") || sample.contains_key("content"))
                && !sample.contains_key("bodyEn")
        })
    }

    fn adapt(&self, raw: &Value, locator: &EntryLocator) -> AdaptResult<Adapted> {
        let root = Fields::of(raw, "", locator)?;
        let mut notes = Vec::new();
        let levels =
            common::collect_levels(&root, LevelKeyStyle::Prefixed, &mut notes, Self::level)?;
        let entry = common::build_entry(&root, levels, &mut notes)?;
        debug!(
            id = %entry.id,
            levels = entry.levels.len(),
            notes = notes.len(),
            "adapted string-level entry"
        );
        Ok(Adapted {
            entry,
            shape: SourceShape::StringLevels,
            notes,
        })
    }
}
