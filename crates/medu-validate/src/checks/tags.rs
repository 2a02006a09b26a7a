use medu_types::ContentEntry;

use crate::check::{CheckContext, EntryCheck, Findings};

/// Blank free-text tags and blank shelf exam names.
pub struct TagCheck;

impl EntryCheck for TagCheck {
    fn name(&self) -> &str {
        "tags"
    }

    fn check(&self, entry: &ContentEntry, _context: &CheckContext<'_>, findings: &mut Findings) {
        let tags = &entry.tags;
        for (group, values) in [
            ("topics", &tags.topics),
            ("systems", &tags.systems),
            ("keywords", &tags.keywords),
        ] {
            let blank = values.iter().filter(|v| v.trim().is_empty()).count();
            if blank > 0 {
                findings.error(format!("tags.{group}"), format!("{blank} blank tag(s)"));
            }
        }
        if let Some(exam) = &tags.exam_relevance {
            for (i, shelf) in exam.shelf.iter().enumerate() {
                if shelf.trim().is_empty() {
                    findings.error(
                        format!("tags.examRelevance.shelf[{i}]"),
                        "blank shelf exam entry",
                    );
                }
            }
        }
    }
}
