use std::fmt;

use serde::Serialize;

use medu_types::{Severity, ValidationIssue};

// ---------------------------------------------------------------------------
// EntryOutcome
// ---------------------------------------------------------------------------

/// What happened to one raw entry of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum EntryOutcome {
    /// Registered under a new id.
    Inserted { id: String, version: u32 },
    /// Replaced a lower version of the same id.
    Replaced { id: String, version: u32, previous: u32 },
    /// Failed adaptation or per-entry validation; not registered.
    Rejected { id: String },
    /// Same version as the registered entry; the registry is unchanged.
    Stale { id: String, version: u32 },
    /// Matched no known shape (or more than one).
    Unrecognized { locator: String },
}

impl EntryOutcome {
    /// The entry id, or the positional locator for unrecognized entries.
    pub fn subject(&self) -> &str {
        match self {
            Self::Inserted { id, .. }
            | Self::Replaced { id, .. }
            | Self::Rejected { id }
            | Self::Stale { id, .. } => id,
            Self::Unrecognized { locator } => locator,
        }
    }

    /// Returns `true` if the entry is now in the registry at this version.
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Inserted { .. } | Self::Replaced { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Inserted { .. } => "inserted",
            Self::Replaced { .. } => "replaced",
            Self::Rejected { .. } => "rejected",
            Self::Stale { .. } => "stale",
            Self::Unrecognized { .. } => "unrecognized",
        }
    }
}

impl fmt::Display for EntryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inserted { id, version } => write!(f, "inserted {id} v{version}"),
            Self::Replaced {
                id,
                version,
                previous,
            } => write!(f, "replaced {id} v{previous} -> v{version}"),
            Self::Rejected { id } => write!(f, "rejected {id}"),
            Self::Stale { id, version } => write!(f, "stale {id} v{version}"),
            Self::Unrecognized { locator } => write!(f, "unrecognized {locator}"),
        }
    }
}

// ---------------------------------------------------------------------------
// LoadReport
// ---------------------------------------------------------------------------

/// End-of-batch summary: every outcome and every issue, in input order.
///
/// A load never aborts on a bad entry; this report is how failures surface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub outcomes: Vec<EntryOutcome>,
    pub issues: Vec<ValidationIssue>,
    /// Set once the corpus-wide pass has run.
    pub corpus_checked: bool,
}

impl LoadReport {
    /// Returns `true` once the corpus pass has run and no error was found
    /// anywhere in the batch.
    pub fn is_complete(&self) -> bool {
        self.corpus_checked && self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Number of outcomes with the given label (see [`EntryOutcome::label`]).
    pub fn outcome_count(&self, label: &str) -> usize {
        self.outcomes.iter().filter(|o| o.label() == label).count()
    }

    pub fn registered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_registered()).count()
    }

    pub fn issues_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.entry_id == id)
    }

    /// The last outcome recorded for `id`.
    pub fn outcome_for(&self, id: &str) -> Option<&EntryOutcome> {
        self.outcomes.iter().rev().find(|o| o.subject() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_requires_corpus_pass() {
        let mut report = LoadReport::default();
        assert!(!report.is_complete());
        report.corpus_checked = true;
        assert!(report.is_complete());
        report
            .issues
            .push(ValidationIssue::warning("a", "nameEs", "missing Spanish name"));
        assert!(report.is_complete());
        report
            .issues
            .push(ValidationIssue::error("a", "levels", "missing level 2"));
        assert!(!report.is_complete());
    }

    #[test]
    fn outcome_lookup_uses_latest() {
        let report = LoadReport {
            outcomes: vec![
                EntryOutcome::Inserted {
                    id: "a".into(),
                    version: 1,
                },
                EntryOutcome::Stale {
                    id: "a".into(),
                    version: 1,
                },
            ],
            ..Default::default()
        };
        assert_eq!(report.outcome_for("a").unwrap().label(), "stale");
        assert_eq!(report.registered_count(), 1);
        assert_eq!(report.outcome_count("stale"), 1);
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(EntryOutcome::Replaced {
            id: "a".into(),
            version: 2,
            previous: 1,
        })
        .unwrap();
        assert_eq!(json["outcome"], "replaced");
        assert_eq!(json["previous"], 1);
    }
}
