//! LearningEngine: orchestrates the full correction pipeline.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use pricewise_core::config::{EnrichmentConfig, LearningConfig};
use pricewise_core::constants::{CONFIDENCE_CEILING, MAX_SAVE_ATTEMPTS};
use pricewise_core::errors::{PricingError, PricingResult, StorageError};
use pricewise_core::knowledge::{CategoryKey, PricingKnowledge};
use pricewise_core::models::{CorrectionRecord, DegradationEvent, QuoteSnapshot};
use pricewise_core::traits::{ICorrectionAnalyzer, IKnowledgeStore};

use crate::diff::diff_quotes;
use crate::extraction::{enrich, AnalyzerSlots, Enrichment};
use crate::locks::KeyedLocks;
use crate::updater::{apply_correction, new_entry, UpdateOutcome};

/// What `process_correction` reports back to the quote flow.
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionOutcome {
    pub has_changes: bool,
    pub corrections: CorrectionRecord,
    /// Adjustment statements learned or re-validated by this correction.
    pub learnings: Vec<String>,
    /// The entry after the update; `None` when nothing was applied.
    pub knowledge: Option<PricingKnowledge>,
    /// The category did not exist before this correction.
    pub created: bool,
    pub replayed: bool,
    pub tailored_prompt: Option<String>,
    pub degradation: Option<DegradationEvent>,
}

impl CorrectionOutcome {
    fn no_changes(corrections: CorrectionRecord) -> Self {
        Self {
            has_changes: false,
            corrections,
            learnings: Vec::new(),
            knowledge: None,
            created: false,
            replayed: false,
            tailored_prompt: None,
            degradation: None,
        }
    }

    fn replayed(corrections: CorrectionRecord, knowledge: PricingKnowledge) -> Self {
        Self {
            has_changes: true,
            corrections,
            learnings: Vec::new(),
            knowledge: Some(knowledge),
            created: false,
            replayed: true,
            tailored_prompt: None,
            degradation: None,
        }
    }

    /// The analyzer was configured but only the numeric update was applied.
    pub fn enrichment_degraded(&self) -> bool {
        self.degradation.is_some()
    }
}

/// The learning engine.
///
/// Orchestrates: diff → enrichment (bounded) → per-key locked
/// read-modify-write with optimistic version checks → history append.
pub struct LearningEngine {
    store: Arc<dyn IKnowledgeStore>,
    analyzer: Option<Arc<dyn ICorrectionAnalyzer>>,
    config: LearningConfig,
    enrichment: EnrichmentConfig,
    slots: AnalyzerSlots,
    confidence_ceiling: f64,
    locks: KeyedLocks,
}

impl LearningEngine {
    pub fn new(store: Arc<dyn IKnowledgeStore>, config: LearningConfig) -> Self {
        let enrichment = EnrichmentConfig::default();
        Self {
            store,
            analyzer: None,
            config,
            slots: AnalyzerSlots::new(enrichment.max_in_flight),
            enrichment,
            confidence_ceiling: CONFIDENCE_CEILING,
            locks: KeyedLocks::new(),
        }
    }

    /// Attach an external correction analyzer.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn ICorrectionAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_enrichment(mut self, enrichment: EnrichmentConfig) -> Self {
        self.slots = AnalyzerSlots::new(enrichment.max_in_flight);
        self.enrichment = enrichment;
        self
    }

    /// Cap for stored confidence, when configured below the hard 0.95 ceiling.
    pub fn with_confidence_ceiling(mut self, ceiling: f64) -> Self {
        self.confidence_ceiling = ceiling;
        self
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Full pipeline for one finalized quote.
    pub fn process_correction(
        &self,
        key: &CategoryKey,
        original: &QuoteSnapshot,
        finalized: &QuoteSnapshot,
        notes: Option<&str>,
    ) -> PricingResult<CorrectionOutcome> {
        let record = diff_quotes(original, finalized, notes);
        if !record.has_changes {
            debug!(key = %key, "no changes, knowledge untouched");
            return Ok(CorrectionOutcome::no_changes(record));
        }
        if !record.skipped_fields.is_empty() {
            warn!(
                key = %key,
                skipped = ?record.skipped_fields,
                "malformed correction fields skipped"
            );
        }

        // A replay never reaches the analyzer. The locked update checks
        // again in case the same correction is racing itself.
        if let Some(existing) = self.store.get_pricing_knowledge(key)? {
            if existing.has_applied(&record.fingerprint) {
                info!(key = %key, fingerprint = %record.fingerprint, "correction replay ignored");
                return Ok(CorrectionOutcome::replayed(record, existing));
            }
        }

        let enrichment = enrich(
            self.analyzer.as_ref(),
            &self.slots,
            &record,
            record.notes.as_deref(),
            Duration::from_millis(self.enrichment.timeout_ms),
        );

        let (update, created) = self.update_locked(key, &record, &enrichment)?;

        if update.replayed {
            info!(key = %key, fingerprint = %record.fingerprint, "correction replay ignored");
            return Ok(CorrectionOutcome::replayed(record, update.knowledge));
        }

        if let Err(e) = self.store.record_historical_total(key, record.final_subtotal) {
            warn!(key = %key, error = %e, "final total not recorded as history");
        }

        info!(
            key = %key,
            sample_count = update.knowledge.sample_count,
            correction_count = update.knowledge.correction_count,
            confidence = update.knowledge.confidence.value(),
            new_adjustments = update.new_adjustments.len(),
            "correction applied"
        );

        let mut learnings = update.new_adjustments;
        learnings.extend(update.revalidated);

        Ok(CorrectionOutcome {
            has_changes: true,
            corrections: record,
            learnings,
            knowledge: Some(update.knowledge),
            created,
            replayed: false,
            tailored_prompt: enrichment.tailored_prompt,
            degradation: enrichment.degradation,
        })
    }

    /// Read-modify-write under the key's lock, retrying on version conflicts.
    fn update_locked(
        &self,
        key: &CategoryKey,
        record: &CorrectionRecord,
        enrichment: &Enrichment,
    ) -> PricingResult<(UpdateOutcome, bool)> {
        let lock = self.locks.lock_for(key);
        let _guard = lock.lock().map_err(|_| StorageError::LockPoisoned {
            resource: format!("knowledge lock {key}"),
        })?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let now = Utc::now();
            let existing = self.store.get_pricing_knowledge(key)?;
            let created = existing.is_none();
            let (base, expected_version) = match existing {
                Some(k) => {
                    let version = k.version;
                    (k, version)
                }
                None => (new_entry(key.clone(), &self.siblings(key), &self.config, now), 0),
            };

            let prior = base.confidence;
            let mut update =
                apply_correction(base, record, &enrichment.adjustments, &self.config, now);
            if !update.applied {
                return Ok((update, false));
            }
            update.knowledge.confidence =
                prior.raised_within(self.config.confidence_step, self.confidence_ceiling);

            match self.store.save_pricing_knowledge(&update.knowledge, expected_version) {
                Ok(version) => {
                    update.knowledge.version = version;
                    return Ok((update, created));
                }
                Err(PricingError::ConcurrentModification { expected, actual, .. })
                    if attempt < MAX_SAVE_ATTEMPTS =>
                {
                    warn!(key = %key, expected, actual, attempt, "version conflict, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Same-contractor entries used for pattern inheritance. Failure inherits nothing.
    fn siblings(&self, key: &CategoryKey) -> Vec<PricingKnowledge> {
        match self.store.list_categories(&key.contractor_id) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %key, error = %e, "sibling categories unavailable, nothing inherited");
                Vec::new()
            }
        }
    }

    /// Create an onboarding entry. An existing entry is returned unchanged.
    pub fn seed_category(
        &self,
        key: &CategoryKey,
        base_rate: Option<f64>,
    ) -> PricingResult<PricingKnowledge> {
        let lock = self.locks.lock_for(key);
        let _guard = lock.lock().map_err(|_| StorageError::LockPoisoned {
            resource: format!("knowledge lock {key}"),
        })?;

        if let Some(existing) = self.store.get_pricing_knowledge(key)? {
            debug!(key = %key, "seed skipped, category exists");
            return Ok(existing);
        }

        let now = Utc::now();
        let initial = self.config.initial_confidence;
        let mut entry = match base_rate {
            Some(rate) => PricingKnowledge::seeded(key.clone(), rate, initial, now),
            None => PricingKnowledge::empty(key.clone(), initial, now),
        };
        entry.version = self.store.save_pricing_knowledge(&entry, 0)?;
        info!(key = %key, base_rate = ?entry.base_rate, "category seeded");
        Ok(entry)
    }

    /// Explicit user removal; the only deletion path.
    pub fn remove_category(&self, key: &CategoryKey) -> PricingResult<bool> {
        let removed = {
            let lock = self.locks.lock_for(key);
            let _guard = lock.lock().map_err(|_| StorageError::LockPoisoned {
                resource: format!("knowledge lock {key}"),
            })?;
            self.store.delete_pricing_knowledge(key)?
        };
        self.locks.forget(key);
        if removed {
            info!(key = %key, "category removed by user");
        }
        Ok(removed)
    }

    /// Record a finalized total that did not go through a correction.
    pub fn record_finalized_total(&self, key: &CategoryKey, total: f64) -> PricingResult<()> {
        self.store.record_historical_total(key, total)
    }
}
