use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a validation finding.
///
/// `Error` marks a structural or referential violation and keeps the entry
/// out of the registry. `Warning` marks a coverage gap and never blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding produced by the validator.
///
/// `path` uses dotted notation relative to the entry, e.g.
/// `levels.3.keyTerms[1].term`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub entry_id: String,
    pub path: String,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        entry_id: impl Into<String>,
        path: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            path: path.into(),
            severity,
            message: message.into(),
        }
    }

    /// Shorthand for an `Error`-severity issue.
    pub fn error(
        entry_id: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(entry_id, path, Severity::Error, message)
    }

    /// Shorthand for a `Warning`-severity issue.
    pub fn warning(
        entry_id: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(entry_id, path, Severity::Warning, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.severity, self.entry_id, self.path, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        let e = ValidationIssue::error("a", "levels", "missing level 3");
        let w = ValidationIssue::warning("a", "nameEs", "missing Spanish name");
        assert!(e.is_error() && !e.is_warning());
        assert!(w.is_warning() && !w.is_error());
    }

    #[test]
    fn display_format() {
        let issue = ValidationIssue::error("topic-x", "version", "version must be positive");
        assert_eq!(
            issue.to_string(),
            "error: topic-x [version] version must be positive"
        );
    }

    #[test]
    fn severity_orders_warning_below_error() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn serde_shape() {
        let issue = ValidationIssue::warning("topic-x", "levels.1.bodyEs", "no translation");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["entryId"], "topic-x");
        assert_eq!(json["severity"], "warning");
    }
}
