use std::collections::HashMap;

use medu_types::ContentEntry;

use crate::check::{level_path, CheckContext, EntryCheck, Findings};

/// Media and citation ids are unique within their entry.
pub struct UniqueIds;

impl EntryCheck for UniqueIds {
    fn name(&self) -> &str {
        "unique-ids"
    }

    fn check(&self, entry: &ContentEntry, _context: &CheckContext<'_>, findings: &mut Findings) {
        duplicates(
            "media",
            entry.media.iter().map(|m| m.id.clone()).enumerate(),
            findings,
        );
        duplicates(
            "citations",
            entry.citations.iter().map(|c| c.id.clone()).enumerate(),
            findings,
        );
    }
}

/// Key terms: unique per level (case-insensitive), with a term and a
/// definition.
pub struct KeyTermCheck;

impl EntryCheck for KeyTermCheck {
    fn name(&self) -> &str {
        "key-terms"
    }

    fn check(&self, entry: &ContentEntry, context: &CheckContext<'_>, findings: &mut Findings) {
        for (key, level) in &entry.levels {
            let base = level_path(key, "keyTerms");
            if level.key_terms.is_empty() && context.config.warn_on_empty_key_terms {
                findings.warning(base.clone(), "level defines no key terms");
            }
            for (i, term) in level.key_terms.iter().enumerate() {
                if term.term.trim().is_empty() {
                    findings.error(format!("{base}[{i}].term"), "key term is empty");
                }
                if term.definition.trim().is_empty() {
                    findings.error(
                        format!("{base}[{i}].definition"),
                        format!("key term `{}` has no definition", term.term),
                    );
                }
            }
            duplicates(
                &base,
                level
                    .key_terms
                    .iter()
                    .map(|t| t.normalized_term())
                    .enumerate()
                    .filter(|(_, t)| !t.is_empty()),
                findings,
            );
        }
    }
}

/// Report every repeat of an id in `ids` as an error at `field[i]`.
fn duplicates(
    field: &str,
    ids: impl Iterator<Item = (usize, String)>,
    findings: &mut Findings,
) {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    for (i, id) in ids {
        match first_seen.get(&id) {
            Some(first) => findings.error(
                format!("{field}[{i}]"),
                format!("duplicate `{id}` (first at {field}[{first}])"),
            ),
            None => {
                first_seen.insert(id, i);
            }
        }
    }
}
