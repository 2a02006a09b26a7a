use serde::Serialize;

use medu_types::{Severity, ValidationIssue};

/// Ordered issues produced by one validation run.
///
/// An empty report means the entry (or corpus) is valid. A report holding
/// only warnings still passes: warnings describe coverage gaps, not defects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no issue has `error` severity.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Returns `true` if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ValidationIssue::is_error)
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.by_severity(Severity::Warning)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity(severity).count()
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// Issues whose path starts with `prefix`.
    pub fn at_path<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.path.starts_with(prefix))
    }
}

impl From<Vec<ValidationIssue>> for ValidationReport {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_alone_are_valid() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid() && report.is_clean());
        report.push(ValidationIssue::warning("a", "nameEs", "missing Spanish name"));
        assert!(report.is_valid());
        assert!(!report.is_clean());
        report.push(ValidationIssue::error("a", "levels", "missing level 5"));
        assert!(!report.is_valid());
        assert_eq!(report.count(Severity::Error), 1);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.at_path("level").count(), 1);
    }
}
