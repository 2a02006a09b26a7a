//! Built-in per-entry checks.

mod coverage;
mod identity;
mod metadata;
mod placeholder;
mod references;
mod structure;
mod tags;
mod vocabulary;

pub use coverage::TranslationCoverage;
pub use identity::{KeyTermCheck, UniqueIds};
pub use metadata::VersionAndTimestamps;
pub use placeholder::PlaceholderText;
pub use references::CrossReferenceCheck;
pub use structure::LevelStructure;
pub use tags::TagCheck;
pub use vocabulary::Vocabulary;

#[cfg(test)]
pub(crate) mod testing {
    use medu_types::{ContentEntry, ValidationIssue};

    use crate::check::{CheckContext, EntryCheck, Findings};
    use crate::config::ValidatorConfig;

    pub fn run(check: &dyn EntryCheck, entry: &ContentEntry) -> Vec<ValidationIssue> {
        run_with(check, entry, &ValidatorConfig::default(), None)
    }

    pub fn run_with(
        check: &dyn EntryCheck,
        entry: &ContentEntry,
        config: &ValidatorConfig,
        registered_version: Option<u32>,
    ) -> Vec<ValidationIssue> {
        let context = CheckContext::new(config, registered_version);
        let mut findings = Findings::new(&entry.id);
        check.check(entry, &context, &mut findings);
        findings.into_issues()
    }

    pub fn paths(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.path.as_str()).collect()
    }
}
