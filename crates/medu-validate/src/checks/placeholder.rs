use regex::Regex;
use tracing::warn;

use medu_types::ContentEntry;

use crate::check::{level_path, CheckContext, EntryCheck, Findings};
use crate::config::ValidatorConfig;

/// Unfinished text (`TODO`, `FIXME`, ...) in names, titles, bodies and key
/// terms.
pub struct PlaceholderText {
    pattern: Option<Regex>,
}

impl PlaceholderText {
    /// Compile the configured markers once.
    pub fn new(config: &ValidatorConfig) -> Self {
        let pattern = config.placeholder_pattern().unwrap_or_else(|err| {
            warn!(error = %err, "placeholder markers do not compile, check disabled");
            None
        });
        Self { pattern }
    }
}

impl EntryCheck for PlaceholderText {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn check(&self, entry: &ContentEntry, _context: &CheckContext<'_>, findings: &mut Findings) {
        let Some(pattern) = &self.pattern else {
            return;
        };
        let mut flag = |path: String, text: &str| {
            if let Some(marker) = pattern.find(text).map(|m| m.as_str()) {
                findings.warning(path, format!("contains placeholder text `{marker}`"));
            }
        };

        flag("name".into(), &entry.name);
        flag("nameEs".into(), &entry.name_es);
        for (key, level) in &entry.levels {
            flag(level_path(key, "titlePrimary"), &level.title_primary);
            flag(level_path(key, "titlePrimaryEs"), &level.title_primary_es);
            flag(level_path(key, "bodyEn"), &level.body_en);
            flag(level_path(key, "bodyEs"), &level.body_es);
            if let Some(summary) = &level.summary {
                flag(level_path(key, "summary"), summary);
            }
            for (i, term) in level.key_terms.iter().enumerate() {
                flag(level_path(key, &format!("keyTerms[{i}].term")), &term.term);
                flag(
                    level_path(key, &format!("keyTerms[{i}].definition")),
                    &term.definition,
                );
            }
            for (i, note) in level.counseling_notes.iter().enumerate() {
                flag(level_path(key, &format!("counselingNotes[{i}]")), &note.text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use medu_types::{KeyTerm, LevelNumber};

    use super::*;
    use crate::checks::testing::{paths, run};

    #[test]
    fn no_markers_means_no_findings() {
        let config = ValidatorConfig {
            placeholder_markers: Vec::new(),
            ..ValidatorConfig::default()
        };
        let mut entry = ContentEntry::minimal("a", "A");
        entry.name_es = "TODO".into();
        assert!(run(&PlaceholderText::new(&config), &entry).is_empty());
    }

    #[test]
    fn flags_markers_anywhere() {
        let mut entry = ContentEntry::minimal("a", "A");
        entry.name_es = "TODO".into();
        let two = entry.levels.get_mut(&LevelNumber::new(2).unwrap()).unwrap();
        two.body_en = "Explain this. FIXME later".into();
        two.key_terms.push(KeyTerm::new("GCS", "placeholder definition"));
        let issues = run(&PlaceholderText::new(&ValidatorConfig::default()), &entry);
        assert_eq!(
            paths(&issues),
            vec![
                "nameEs",
                "levels.2.bodyEn",
                "levels.2.keyTerms[1].definition"
            ]
        );
        assert!(issues.iter().all(|i| i.is_warning()));
    }

    #[test]
    fn spanish_todos_is_not_a_marker() {
        let mut entry = ContentEntry::minimal("a", "A");
        entry.name_es = "Para todos".into();
        assert!(run(&PlaceholderText::new(&ValidatorConfig::default()), &entry).is_empty());
    }
}
