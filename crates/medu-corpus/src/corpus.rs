use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use medu_adapt::{type_name, AdaptError, Adapted, AdapterSet, EntryLocator};
use medu_query::ContentQuery;
use medu_registry::{ContentStore, InMemoryRegistry, RegistryError, UpsertOutcome};
use medu_types::ValidationIssue;
use medu_validate::Validator;

use crate::config::CorpusConfig;
use crate::coverage::CoverageReport;
use crate::error::{CorpusError, CorpusResult};
use crate::report::{EntryOutcome, LoadReport};

/// A content corpus under construction: adapters, validator and registry
/// wired into one load pipeline.
///
/// Raw entries flow adapt -> validate -> upsert, one at a time and in input
/// order. [`Corpus::finish`] then runs the corpus-wide pass. Entries that pass
/// stay registered even when siblings fail.
pub struct Corpus {
    adapters: AdapterSet,
    validator: Validator,
    registry: Arc<InMemoryRegistry>,
    config: CorpusConfig,
    /// Warnings of the registered version of each id.
    retained: HashMap<String, Vec<ValidationIssue>>,
    pending: LoadReport,
    next_index: usize,
}

impl Corpus {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            adapters: AdapterSet::with_default_adapters(),
            validator: Validator::with_default_checks(config.validator.clone()),
            registry: Arc::new(InMemoryRegistry::new()),
            config,
            retained: HashMap::new(),
            pending: LoadReport::default(),
            next_index: 0,
        }
    }

    /// Replace the adapter set, for corpora with additional source shapes.
    pub fn with_adapters(mut self, adapters: AdapterSet) -> Self {
        self.adapters = adapters;
        self
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<InMemoryRegistry> {
        &self.registry
    }

    /// Read-only query surface over the registry.
    pub fn query(&self) -> ContentQuery {
        ContentQuery::new(self.registry.clone())
    }

    // ---- Loading ----

    /// Load a batch given as a JSON array of raw entries, then run the corpus
    /// pass. Anything other than an array is a [`CorpusError::MalformedBatch`].
    pub fn load_batch(&mut self, batch: &Value) -> CorpusResult<LoadReport> {
        let items = batch.as_array().ok_or_else(|| {
            CorpusError::MalformedBatch(format!("expected an array of entries, got {}", type_name(batch)))
        })?;
        self.load_entries(items)
    }

    /// Ingest every raw entry in order, then run the corpus pass.
    pub fn load_entries<'a>(
        &mut self,
        items: impl IntoIterator<Item = &'a Value>,
    ) -> CorpusResult<LoadReport> {
        for raw in items {
            self.ingest(raw)?;
        }
        self.finish()
    }

    /// Adapt, validate and upsert one raw entry.
    ///
    /// Per-entry failures are recorded in the pending report and returned as
    /// an outcome; only registry faults are errors.
    pub fn ingest(&mut self, raw: &Value) -> CorpusResult<EntryOutcome> {
        let index = self.next_index;
        self.next_index += 1;

        let outcome = match self.adapters.adapt_at(raw, index) {
            Ok(adapted) => self.admit(adapted)?,
            Err(err) => self.reject_raw(err),
        };
        self.pending.outcomes.push(outcome.clone());
        Ok(outcome)
    }

    fn reject_raw(&mut self, err: AdaptError) -> EntryOutcome {
        let locator = err.locator().to_string();
        warn!(entry = %locator, error = %err, "entry not adapted");
        let message = match &err {
            AdaptError::ShapeUnrecognized { reason, .. } => format!("shape unrecognized: {reason}"),
            AdaptError::MissingField { .. } => "missing required field".to_string(),
            AdaptError::Malformed { reason, .. } => reason.clone(),
        };
        self.pending.issues.push(ValidationIssue::error(
            &locator,
            err.path().unwrap_or_default(),
            message,
        ));
        match (err.is_shape_unrecognized(), err.locator()) {
            (true, _) => EntryOutcome::Unrecognized { locator },
            (false, EntryLocator::Id(id)) => EntryOutcome::Rejected { id: id.clone() },
            (false, EntryLocator::Index(_)) => EntryOutcome::Rejected { id: locator },
        }
    }

    fn admit(&mut self, adapted: Adapted) -> CorpusResult<EntryOutcome> {
        let Adapted { entry, notes, .. } = adapted;
        let id = entry.id.clone();
        let version = entry.version;
        let mut report = self
            .validator
            .validate_entry(&entry, self.registry.version_of(&id)?);
        report.issues.extend(
            notes
                .iter()
                .filter(|note| note.is_missing_advisory_field())
                .map(|note| {
                    ValidationIssue::warning(&id, &note.path, format!("missing `{}`", note.path))
                }),
        );

        if report.has_errors() {
            warn!(
                id = %id,
                errors = report.errors().count(),
                "entry failed validation"
            );
            self.pending.issues.extend(report.issues);
            return Ok(EntryOutcome::Rejected { id });
        }

        let mut warnings = report.issues;
        let candidate_digest = entry.digest().ok();
        let outcome = match self.registry.upsert(entry) {
            Ok(UpsertOutcome::Inserted) => EntryOutcome::Inserted {
                id: id.clone(),
                version,
            },
            Ok(UpsertOutcome::Replaced { previous }) => EntryOutcome::Replaced {
                id: id.clone(),
                version,
                previous,
            },
            Err(RegistryError::StaleVersion { stored, .. }) => {
                debug!(id = %id, version = stored, "same version already registered");
                if self.config.warn_on_unversioned_change && self.changed(&id, candidate_digest)? {
                    self.pending.issues.push(ValidationIssue::warning(
                        &id,
                        "version",
                        format!("content changed without version bump (v{stored})"),
                    ));
                }
                // Warnings of an unregistered candidate are dropped.
                warnings.clear();
                EntryOutcome::Stale {
                    id: id.clone(),
                    version,
                }
            }
            Err(other) => return Err(other.into()),
        };

        if outcome.is_registered() {
            info!(id = %id, version, warnings = warnings.len(), "entry registered");
            self.pending.issues.extend(warnings.iter().cloned());
            self.retained.insert(id, warnings);
        }
        Ok(outcome)
    }

    /// Whether the registered entry differs from a candidate with `digest`.
    fn changed(
        &self,
        id: &str,
        digest: Option<medu_types::ContentDigest>,
    ) -> CorpusResult<bool> {
        let stored = self.registry.require(id)?;
        Ok(stored.digest().ok() != digest)
    }

    /// Run the corpus-wide pass over the registry and close the current load.
    ///
    /// Returns everything recorded since the previous `finish`.
    pub fn finish(&mut self) -> CorpusResult<LoadReport> {
        let corpus_report = self.validator.validate_corpus(self.registry.as_ref())?;
        let mut report = mem::take(&mut self.pending);
        report.issues.extend(corpus_report.issues);
        report.corpus_checked = true;
        self.next_index = 0;
        info!(
            entries = report.outcomes.len(),
            registered = report.registered_count(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            complete = report.is_complete(),
            "load finished"
        );
        Ok(report)
    }

    // ---- Reporting ----

    /// Per-entry warnings retained for the registered version of `id`.
    pub fn warnings_for(&self, id: &str) -> &[ValidationIssue] {
        self.retained.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Translation coverage of every registered entry, in insertion order.
    pub fn coverage(&self) -> CorpusResult<CoverageReport> {
        let entries = self.registry.entries()?;
        Ok(CoverageReport::from_entries(
            entries.iter().map(Arc::as_ref),
            self.config.validator.min_spanish_body_ratio,
        ))
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new(CorpusConfig::default())
    }
}
