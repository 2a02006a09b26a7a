//! Translation coverage over registered entries.

use serde::Serialize;

use medu_types::ContentEntry;

/// Spanish coverage of one entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryCoverage {
    pub id: String,
    pub has_name_es: bool,
    /// Levels whose `bodyEs` is empty.
    pub levels_missing_body_es: Vec<u8>,
    /// Levels whose `bodyEs` is present but shorter than the configured
    /// fraction of `bodyEn`.
    pub levels_partial_body_es: Vec<u8>,
    /// Levels whose `titlePrimaryEs` is empty.
    pub levels_missing_title_es: Vec<u8>,
    /// Spanish body length over English body length, in characters, across
    /// all levels. Partial translations land between 0 and 1.
    pub body_ratio: f64,
}

impl EntryCoverage {
    pub fn of(entry: &ContentEntry, min_ratio: f64) -> Self {
        let mut missing_body = Vec::new();
        let mut partial_body = Vec::new();
        let mut missing_title = Vec::new();
        let mut chars_en = 0usize;
        let mut chars_es = 0usize;
        for (key, level) in &entry.levels {
            if !level.has_spanish_body() {
                missing_body.push(key.get());
            } else if level.has_partial_spanish_body(min_ratio) {
                partial_body.push(key.get());
            }
            if level.title_primary_es.trim().is_empty() {
                missing_title.push(key.get());
            }
            chars_en += level.body_en.chars().count();
            chars_es += level.body_es.chars().count();
        }
        let body_ratio = if chars_en == 0 {
            0.0
        } else {
            chars_es as f64 / chars_en as f64
        };
        Self {
            id: entry.id.clone(),
            has_name_es: entry.has_spanish_name(),
            levels_missing_body_es: missing_body,
            levels_partial_body_es: partial_body,
            levels_missing_title_es: missing_title,
            body_ratio,
        }
    }

    /// Name, every title and every body have a complete Spanish counterpart.
    pub fn is_fully_translated(&self) -> bool {
        self.has_name_es
            && self.levels_missing_body_es.is_empty()
            && self.levels_partial_body_es.is_empty()
            && self.levels_missing_title_es.is_empty()
    }
}

/// Corpus totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    pub entries: usize,
    pub fully_translated: usize,
    pub missing_name_es: usize,
    pub levels_missing_body_es: usize,
    pub levels_partial_body_es: usize,
    pub levels_missing_title_es: usize,
    pub mean_body_ratio: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CoverageReport {
    pub entries: Vec<EntryCoverage>,
    pub summary: CoverageSummary,
}

impl CoverageReport {
    /// Coverage of `entries`; `min_ratio` separates partial from complete
    /// Spanish bodies.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a ContentEntry>,
        min_ratio: f64,
    ) -> Self {
        let entries: Vec<EntryCoverage> = entries
            .into_iter()
            .map(|entry| EntryCoverage::of(entry, min_ratio))
            .collect();
        let count = entries.len();
        let summary = CoverageSummary {
            entries: count,
            fully_translated: entries.iter().filter(|e| e.is_fully_translated()).count(),
            missing_name_es: entries.iter().filter(|e| !e.has_name_es).count(),
            levels_missing_body_es: entries.iter().map(|e| e.levels_missing_body_es.len()).sum(),
            levels_partial_body_es: entries.iter().map(|e| e.levels_partial_body_es.len()).sum(),
            levels_missing_title_es: entries
                .iter()
                .map(|e| e.levels_missing_title_es.len())
                .sum(),
            mean_body_ratio: if count == 0 {
                0.0
            } else {
                entries.iter().map(|e| e.body_ratio).sum::<f64>() / count as f64
            },
        };
        Self { entries, summary }
    }

    /// Entries with at least one gap.
    pub fn gaps(&self) -> impl Iterator<Item = &EntryCoverage> {
        self.entries.iter().filter(|e| !e.is_fully_translated())
    }
}

#[cfg(test)]
mod tests {
    use medu_types::LevelNumber;

    use super::*;

    #[test]
    fn minimal_entry_is_fully_translated() {
        let coverage = EntryCoverage::of(&ContentEntry::minimal("a", "A"), 0.5);
        assert!(coverage.is_fully_translated());
        assert!(coverage.body_ratio > 0.0);
    }

    #[test]
    fn partial_translation_is_counted() {
        let mut entry = ContentEntry::minimal("a", "A");
        entry.name_es.clear();
        for level in entry.levels.values_mut() {
            level.body_en = "0123456789".into();
            level.body_es = "01234".into();
        }
        entry
            .levels
            .get_mut(&LevelNumber::new(3).unwrap())
            .unwrap()
            .body_es
            .clear();

        let report = CoverageReport::from_entries([&entry, &ContentEntry::minimal("b", "B")], 0.3);
        let a = &report.entries[0];
        assert_eq!(a.levels_missing_body_es, vec![3]);
        assert!((a.body_ratio - 0.4).abs() < 1e-9);
        assert_eq!(report.summary.entries, 2);
        assert_eq!(report.summary.fully_translated, 1);
        assert_eq!(report.summary.missing_name_es, 1);
        assert_eq!(report.summary.levels_missing_body_es, 1);
        assert_eq!(report.gaps().count(), 1);
    }

    #[test]
    fn short_spanish_body_is_a_gap() {
        let mut entry = ContentEntry::minimal("a", "A");
        let three = entry.levels.get_mut(&LevelNumber::new(3).unwrap()).unwrap();
        three.body_en = "The primary survey checks airway, breathing and circulation first.".into();
        three.body_es = "En".into();

        let coverage = EntryCoverage::of(&entry, 0.5);
        assert!(coverage.levels_missing_body_es.is_empty());
        assert_eq!(coverage.levels_partial_body_es, vec![3]);
        assert!(!coverage.is_fully_translated());

        let report = CoverageReport::from_entries([&entry], 0.5);
        assert_eq!(report.summary.levels_partial_body_es, 1);
        assert_eq!(report.summary.fully_translated, 0);
    }
}
