use medu_types::ContentEntry;

use crate::check::{CheckContext, EntryCheck, Findings};
use crate::config::ValidatorConfig;

/// Shape of each cross reference. Resolution happens in the corpus pass.
pub struct CrossReferenceCheck;

impl EntryCheck for CrossReferenceCheck {
    fn name(&self) -> &str {
        "cross-references"
    }

    fn check(&self, entry: &ContentEntry, context: &CheckContext<'_>, findings: &mut Findings) {
        for (i, reference) in entry.cross_references.iter().enumerate() {
            if reference.target_id.trim().is_empty() {
                findings.error(
                    format!("crossReferences[{i}].targetId"),
                    "cross reference has no target",
                );
            }
            if context.config.check_vocabulary
                && !ValidatorConfig::knows(&context.config.relationships, &reference.relationship)
            {
                findings.warning(
                    format!("crossReferences[{i}].relationship"),
                    format!("unknown relationship `{}`", reference.relationship),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use medu_types::CrossReference;

    use super::*;
    use crate::checks::testing::{paths, run};

    #[test]
    fn empty_target_and_unknown_relationship() {
        let mut entry = ContentEntry::minimal("a", "A");
        entry.cross_references = vec![
            CrossReference::new("b", "prerequisite"),
            CrossReference::new("", "related"),
            CrossReference::new("c", "cousin"),
        ];
        let issues = run(&CrossReferenceCheck, &entry);
        assert_eq!(
            paths(&issues),
            vec!["crossReferences[1].targetId", "crossReferences[2].relationship"]
        );
        assert!(issues[0].is_error());
        assert!(issues[1].is_warning());
    }
}
