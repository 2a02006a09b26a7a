use medu_types::ContentEntry;

use crate::check::{CheckContext, EntryCheck, Findings};
use crate::config::ValidatorConfig;

/// Content type, status and exam names against the configured vocabularies.
///
/// Both fields are open enumerations, so unknown values are warnings.
pub struct Vocabulary;

impl EntryCheck for Vocabulary {
    fn name(&self) -> &str {
        "vocabulary"
    }

    fn check(&self, entry: &ContentEntry, context: &CheckContext<'_>, findings: &mut Findings) {
        let config = context.config;
        if !config.check_vocabulary {
            return;
        }
        if !ValidatorConfig::knows(&config.content_types, &entry.content_type) {
            findings.warning("type", format!("unknown content type `{}`", entry.content_type));
        }
        if !ValidatorConfig::knows(&config.statuses, entry.status.as_str()) {
            findings.warning("status", format!("unknown status `{}`", entry.status));
        }
        if let Some(exam) = &entry.tags.exam_relevance {
            for name in &exam.other {
                if !ValidatorConfig::knows(&config.exam_types, name) {
                    findings.warning(
                        "tags.examRelevance",
                        format!("unknown exam type `{name}`"),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use medu_types::{ContentStatus, ExamRelevance};

    use super::*;
    use crate::checks::testing::{paths, run, run_with};

    #[test]
    fn unknown_values_warn() {
        let mut entry = ContentEntry::minimal("a", "A");
        entry.content_type = "gadget".into();
        entry.status = ContentStatus::from("archived");
        entry.tags.exam_relevance = Some(ExamRelevance {
            usmle: true,
            other: ["comlex".to_string()].into(),
            ..Default::default()
        });
        let issues = run(&Vocabulary, &entry);
        assert_eq!(paths(&issues), vec!["type", "status", "tags.examRelevance"]);
        assert!(issues.iter().all(|i| i.is_warning()));
    }

    #[test]
    fn disabled_vocabulary_is_silent() {
        let mut entry = ContentEntry::minimal("a", "A");
        entry.content_type = "gadget".into();
        let config = ValidatorConfig {
            check_vocabulary: false,
            ..Default::default()
        };
        assert!(run_with(&Vocabulary, &entry, &config, None).is_empty());
    }
}
