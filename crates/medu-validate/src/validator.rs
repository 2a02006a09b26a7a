use tracing::{debug, info};

use medu_registry::ContentStore;
use medu_types::{ContentEntry, ValidationIssue};

use crate::check::{CheckContext, EntryCheck, Findings};
use crate::checks::{
    CrossReferenceCheck, KeyTermCheck, LevelStructure, PlaceholderText, TagCheck,
    TranslationCoverage, UniqueIds, VersionAndTimestamps, Vocabulary,
};
use crate::config::ValidatorConfig;
use crate::error::ValidateResult;
use crate::report::ValidationReport;

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Runs the per-entry checks and the corpus-wide reference pass.
///
/// The validator is pure: it reads the registry in the corpus pass but never
/// writes to it.
pub struct Validator {
    checks: Vec<Box<dyn EntryCheck>>,
    config: ValidatorConfig,
}

impl Validator {
    /// A validator with no checks. Use [`Self::add_check`] or
    /// [`Self::with_default_checks`].
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            checks: Vec::new(),
            config,
        }
    }

    /// The standard pipeline: structure, identity, metadata, references,
    /// then the advisory checks.
    pub fn with_default_checks(config: ValidatorConfig) -> Self {
        let placeholders = PlaceholderText::new(&config);
        let mut validator = Self::new(config);
        validator.add_check(Box::new(LevelStructure));
        validator.add_check(Box::new(UniqueIds));
        validator.add_check(Box::new(KeyTermCheck));
        validator.add_check(Box::new(VersionAndTimestamps));
        validator.add_check(Box::new(CrossReferenceCheck));
        validator.add_check(Box::new(TagCheck));
        validator.add_check(Box::new(TranslationCoverage));
        validator.add_check(Box::new(Vocabulary));
        validator.add_check(Box::new(placeholders));
        validator
    }

    pub fn add_check(&mut self, check: Box<dyn EntryCheck>) {
        self.checks.push(check);
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Per-entry pass. `registered_version` is the version stored under the
    /// same id, if any.
    pub fn validate_entry(
        &self,
        entry: &ContentEntry,
        registered_version: Option<u32>,
    ) -> ValidationReport {
        let context = CheckContext::new(&self.config, registered_version);
        let mut findings = Findings::new(&entry.id);
        for check in &self.checks {
            let before = findings.len();
            check.check(entry, &context, &mut findings);
            if findings.len() > before {
                debug!(
                    id = %entry.id,
                    check = check.name(),
                    issues = findings.len() - before,
                    "check reported issues"
                );
            }
        }
        ValidationReport::from(findings.into_issues())
    }

    /// Corpus-wide pass over everything currently registered: every cross
    /// reference must resolve. Self references are reported as warnings.
    ///
    /// Id uniqueness needs no check here: the registry is keyed by id.
    pub fn validate_corpus(&self, store: &dyn ContentStore) -> ValidateResult<ValidationReport> {
        let mut report = ValidationReport::new();
        let entries = store.entries()?;
        for entry in &entries {
            for (i, reference) in entry.cross_references.iter().enumerate() {
                let path = format!("crossReferences[{i}].targetId");
                if reference.target_id.is_empty() {
                    continue;
                }
                if reference.target_id == entry.id {
                    report.push(ValidationIssue::warning(
                        &entry.id,
                        path,
                        "entry references itself",
                    ));
                } else if !store.contains(&reference.target_id)? {
                    report.push(ValidationIssue::error(
                        &entry.id,
                        path,
                        format!("unresolved cross reference to `{}`", reference.target_id),
                    ));
                }
            }
        }
        info!(
            entries = entries.len(),
            unresolved = report.count(medu_types::Severity::Error),
            "corpus pass complete"
        );
        Ok(report)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_default_checks(ValidatorConfig::default())
    }
}
