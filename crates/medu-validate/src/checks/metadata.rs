use medu_types::ContentEntry;

use crate::check::{CheckContext, EntryCheck, Findings};

/// Identity fields, version monotonicity and timestamp ordering.
pub struct VersionAndTimestamps;

impl EntryCheck for VersionAndTimestamps {
    fn name(&self) -> &str {
        "metadata"
    }

    fn check(&self, entry: &ContentEntry, context: &CheckContext<'_>, findings: &mut Findings) {
        if entry.id.trim().is_empty() {
            findings.error("id", "id is empty");
        }
        if entry.name.trim().is_empty() {
            findings.error("name", "name is empty");
        }

        if entry.version == 0 {
            findings.error("version", "version must be a positive integer");
        }
        if let Some(registered) = context.registered_version {
            if entry.version < registered {
                findings.error(
                    "version",
                    format!(
                        "version {} is lower than registered version {registered}",
                        entry.version
                    ),
                );
            }
        }

        if entry.updated_at < entry.created_at {
            findings.error(
                "updatedAt",
                format!(
                    "updatedAt {} precedes createdAt {}",
                    entry.updated_at.to_rfc3339(),
                    entry.created_at.to_rfc3339()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::checks::testing::{paths, run, run_with};
    use crate::config::ValidatorConfig;

    #[test]
    fn zero_version_and_backwards_time() {
        let mut entry = ContentEntry::minimal("a", "A");
        entry.version = 0;
        entry.updated_at = entry.created_at - Duration::days(1);
        let issues = run(&VersionAndTimestamps, &entry);
        assert_eq!(paths(&issues), vec!["version", "updatedAt"]);
        assert!(issues.iter().all(|i| i.is_error()));
    }

    #[test]
    fn lower_than_registered_is_error() {
        let mut entry = ContentEntry::minimal("a", "A");
        entry.version = 2;
        let config = ValidatorConfig::default();
        assert!(run_with(&VersionAndTimestamps, &entry, &config, Some(3))[0].is_error());
        assert!(run_with(&VersionAndTimestamps, &entry, &config, Some(2)).is_empty());
        assert!(run_with(&VersionAndTimestamps, &entry, &config, Some(1)).is_empty());
    }
}
