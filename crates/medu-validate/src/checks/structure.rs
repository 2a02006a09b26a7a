use medu_types::ContentEntry;

use crate::check::{level_path, CheckContext, EntryCheck, Findings};

/// Level completeness, level numbering, non-empty English bodies and titles.
pub struct LevelStructure;

impl EntryCheck for LevelStructure {
    fn name(&self) -> &str {
        "levels"
    }

    fn check(&self, entry: &ContentEntry, _context: &CheckContext<'_>, findings: &mut Findings) {
        for missing in entry.missing_levels() {
            findings.error("levels", format!("missing level {missing}"));
        }

        for (key, level) in &entry.levels {
            if level.level != key.get() {
                findings.error(
                    level_path(key, "level"),
                    format!("level number {} does not match its key {key}", level.level),
                );
            }
            if level.body_en.trim().is_empty() {
                findings.error(level_path(key, "bodyEn"), "English body is empty");
            }
            if level.title_primary.trim().is_empty() {
                findings.warning(level_path(key, "titlePrimary"), "level title is empty");
            }
        }
    }
}
