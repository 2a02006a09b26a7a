use medu_types::ContentEntry;

use crate::check::{level_path, CheckContext, EntryCheck, Findings};

/// Spanish coverage gaps. Always warnings.
pub struct TranslationCoverage;

impl EntryCheck for TranslationCoverage {
    fn name(&self) -> &str {
        "translation"
    }

    fn check(&self, entry: &ContentEntry, context: &CheckContext<'_>, findings: &mut Findings) {
        let min_ratio = context.config.min_spanish_body_ratio;
        if !entry.has_spanish_name() {
            findings.warning("nameEs", "missing Spanish name");
        }
        for (key, level) in &entry.levels {
            if level.title_primary_es.trim().is_empty() {
                findings.warning(level_path(key, "titlePrimaryEs"), "missing Spanish title");
            }
            if !level.has_spanish_body() {
                findings.warning(level_path(key, "bodyEs"), "missing Spanish body");
            } else if level.has_partial_spanish_body(min_ratio) {
                let ratio = level.spanish_body_ratio().unwrap_or_default();
                findings.warning(
                    level_path(key, "bodyEs"),
                    format!("partial Spanish body ({:.0}% of English)", ratio * 100.0),
                );
            }
        }
    }
}
