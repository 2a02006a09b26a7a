use medu_types::{ContentEntry, ValidationIssue};

use crate::config::ValidatorConfig;

// ---------------------------------------------------------------------------
// CheckContext
// ---------------------------------------------------------------------------

/// What a check may know besides the entry itself.
pub struct CheckContext<'a> {
    pub config: &'a ValidatorConfig,
    /// Version currently registered under the entry's id, if any.
    pub registered_version: Option<u32>,
}

impl<'a> CheckContext<'a> {
    pub fn new(config: &'a ValidatorConfig, registered_version: Option<u32>) -> Self {
        Self {
            config,
            registered_version,
        }
    }
}

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Issue collector bound to one entry id.
pub struct Findings {
    entry_id: String,
    issues: Vec<ValidationIssue>,
}

impl Findings {
    pub fn new(entry_id: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            issues: Vec::new(),
        }
    }

    pub fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues
            .push(ValidationIssue::error(&self.entry_id, path, message));
    }

    pub fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues
            .push(ValidationIssue::warning(&self.entry_id, path, message));
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

// ---------------------------------------------------------------------------
// EntryCheck trait
// ---------------------------------------------------------------------------

/// One rule of the per-entry pass.
///
/// Checks are independent: each inspects the whole entry and records any
/// number of findings. They never short-circuit each other, so a report lists
/// every problem of an entry at once.
pub trait EntryCheck: Send + Sync {
    /// Short name used in logs (e.g. "levels", "key-terms").
    fn name(&self) -> &str;

    fn check(&self, entry: &ContentEntry, context: &CheckContext<'_>, findings: &mut Findings);
}

/// Dotted path of a field of level `level`.
pub(crate) fn level_path(level: impl std::fmt::Display, field: &str) -> String {
    format!("levels.{level}.{field}")
}
