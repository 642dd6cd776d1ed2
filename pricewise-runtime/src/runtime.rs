//! PricingRuntime: owns all engines and the shared store.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use pricewise_confidence::ConfidenceEstimator;
use pricewise_core::config::PricewiseConfig;
use pricewise_core::errors::{PricingError, PricingResult};
use pricewise_core::knowledge::{CategoryKey, PricingKnowledge};
use pricewise_core::models::{
    CandidateQuote, CategoryConfidence, ConfidenceLabel, ConfidenceScore, DegradationEvent,
    PricingExplanation, QuoteSnapshot, SanityVerdict,
};
use pricewise_core::traits::IKnowledgeStore;
use pricewise_explain::{ExplainContext, ExplanationTracer};
use pricewise_guard::SanityGuard;
use pricewise_learning::{CorrectionOutcome, LearningEngine};
use pricewise_observability::{
    confidence_span, explain_span, learning_span, sanity_span, ComponentHealth,
    ObservabilityEngine,
};
use pricewise_storage::StorageEngine;
use tracing::warn;

use crate::options::RuntimeOptions;

const STORAGE_COMPONENT: &str = "storage";

/// The central runtime owning all Pricewise engines.
///
/// Read paths (`check_quote_sanity`, `get_category_confidence`,
/// `explain_quote`) never surface storage failures; they degrade to global
/// bounds or low confidence and record a degradation event.
pub struct PricingRuntime {
    store: Arc<dyn IKnowledgeStore>,
    learning: LearningEngine,
    confidence: ConfidenceEstimator,
    guard: SanityGuard,
    tracer: ExplanationTracer,
    observability: Mutex<ObservabilityEngine>,
    config: PricewiseConfig,
}

impl PricingRuntime {
    pub fn new(opts: RuntimeOptions) -> PricingResult<Self> {
        let config = match &opts.config_toml {
            Some(toml_str) => PricewiseConfig::from_toml(toml_str)?,
            None => PricewiseConfig::default(),
        };

        let store: Arc<dyn IKnowledgeStore> = match (opts.store, &opts.db_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(StorageEngine::open(path)?),
            (None, None) => Arc::new(StorageEngine::open_in_memory()?),
        };

        let mut learning = LearningEngine::new(Arc::clone(&store), config.learning.clone())
            .with_enrichment(config.enrichment.clone())
            .with_confidence_ceiling(config.confidence.ceiling);
        if let Some(analyzer) = opts.analyzer {
            learning = learning.with_analyzer(analyzer);
        }

        Ok(Self {
            store,
            learning,
            confidence: ConfidenceEstimator::new(config.confidence.clone()),
            guard: SanityGuard::new(config.guard.clone()),
            tracer: ExplanationTracer::new(config.explain.clone()),
            observability: Mutex::new(ObservabilityEngine::new()),
            config,
        })
    }

    pub fn config(&self) -> &PricewiseConfig {
        &self.config
    }

    /// Validate a candidate total before it is shown.
    ///
    /// A `block` verdict is returned, not raised; use
    /// [`SanityVerdict::into_result`] to turn it into `BlockedPricing`.
    pub fn check_quote_sanity(
        &self,
        total: f64,
        category: &str,
        contractor_id: &str,
    ) -> PricingResult<SanityVerdict> {
        let key = category_key(contractor_id, category)?;
        let _span = sanity_span!(key.contractor_id, key.category).entered();

        let checked = self.guard.check_with_store(self.store.as_ref(), &key, total);
        if let Some(e) = &checked.read_error {
            self.degrade(e, "global_bounds");
        }

        self.observe(|obs| {
            obs.metrics.sanity.record(checked.verdict.action);
            if checked.degraded() {
                obs.metrics.sanity.storage_fallbacks += 1;
            } else {
                obs.mark_recovered(STORAGE_COMPONENT);
            }
        });
        Ok(checked.verdict)
    }

    /// Diff the AI quote against the user's final version and learn from it.
    pub fn process_correction(
        &self,
        contractor_id: &str,
        category: &str,
        original: &QuoteSnapshot,
        finalized: &QuoteSnapshot,
        notes: Option<&str>,
    ) -> PricingResult<CorrectionOutcome> {
        let key = category_key(contractor_id, category)?;
        let _span = learning_span!(key.contractor_id, key.category).entered();

        let outcome = self
            .learning
            .process_correction(&key, original, finalized, notes)?;

        self.observe(|obs| {
            obs.metrics.record_correction(
                outcome.has_changes,
                outcome.replayed,
                outcome.created,
                outcome.enrichment_degraded(),
            );
            if let Some(event) = &outcome.degradation {
                obs.record_degradation(event.clone());
            }
        });
        Ok(outcome)
    }

    /// Stored confidence tier, correction-count label and continuous score.
    ///
    /// An unknown category (or an unreadable store) reports low confidence.
    pub fn get_category_confidence(
        &self,
        contractor_id: &str,
        category: &str,
    ) -> PricingResult<CategoryConfidence> {
        let key = category_key(contractor_id, category)?;
        let _span = confidence_span!(key.contractor_id, key.category).entered();

        let result = match self.store.get_pricing_knowledge(&key) {
            Ok(Some(knowledge)) => self.confidence.category_confidence(&knowledge),
            Ok(None) => self.confidence.unknown_category(),
            Err(e) => {
                self.degrade(&e, "low_confidence");
                self.confidence.unknown_category()
            }
        };
        self.observe(|obs| obs.metrics.confidence_reads += 1);
        Ok(result)
    }

    /// Decompose a final quote into an auditable explanation.
    ///
    /// The category comes from `quote.job_category`. Related categories of
    /// the same contractor are considered for base-rate transfer.
    pub fn explain_quote(
        &self,
        contractor_id: &str,
        quote: &CandidateQuote,
        context: &ExplainContext,
    ) -> PricingResult<PricingExplanation> {
        let key = category_key(contractor_id, &quote.job_category)?;
        let _span = explain_span!(key.contractor_id, key.category).entered();

        let entries = match self.store.list_categories(&key.contractor_id) {
            Ok(entries) => entries,
            Err(e) => {
                self.degrade(&e, "default_base_rate");
                Vec::new()
            }
        };
        let (own, related): (Vec<PricingKnowledge>, Vec<PricingKnowledge>) = entries
            .into_iter()
            .partition(|k| k.key.category == key.category);
        let knowledge = own.into_iter().next();

        let mut context = context.clone();
        let as_of = *context.as_of.get_or_insert_with(Utc::now);

        let (score, label) = match &knowledge {
            Some(k) => (
                self.confidence.score(k, as_of),
                self.confidence.label(k.correction_count),
            ),
            None => (ConfidenceScore::none(), ConfidenceLabel::LimitedData),
        };

        let explanation =
            self.tracer
                .explain(quote, &context, knowledge.as_ref(), &related, score, label);
        self.observe(|obs| obs.metrics.explanations += 1);
        Ok(explanation)
    }

    /// Create a category at onboarding, optionally with a trade base rate.
    pub fn seed_category(
        &self,
        contractor_id: &str,
        category: &str,
        base_rate: Option<f64>,
    ) -> PricingResult<PricingKnowledge> {
        let key = category_key(contractor_id, category)?;
        self.learning.seed_category(&key, base_rate)
    }

    /// Explicitly remove a category. Returns whether it existed.
    pub fn remove_category(&self, contractor_id: &str, category: &str) -> PricingResult<bool> {
        let key = category_key(contractor_id, category)?;
        self.learning.remove_category(&key)
    }

    /// Record a finalized total that did not go through a correction.
    pub fn record_finalized_quote(
        &self,
        contractor_id: &str,
        category: &str,
        total: f64,
    ) -> PricingResult<()> {
        let key = category_key(contractor_id, category)?;
        self.learning.record_finalized_total(&key, total)
    }

    /// Every category of a contractor, sorted by name.
    pub fn list_categories(&self, contractor_id: &str) -> PricingResult<Vec<PricingKnowledge>> {
        let contractor_id = contractor(contractor_id)?;
        self.store.list_categories(contractor_id)
    }

    /// Counters and active degradations as JSON.
    pub fn metrics_snapshot(&self) -> PricingResult<serde_json::Value> {
        let obs = self.observability.lock().map_err(|_| {
            pricewise_core::errors::StorageError::LockPoisoned {
                resource: "observability".to_string(),
            }
        })?;
        obs.metrics_snapshot()
    }

    /// Components currently running on a fallback.
    pub fn degraded_components(&self) -> Vec<ComponentHealth> {
        match self.observability.lock() {
            Ok(obs) => obs.degraded_components(),
            Err(_) => Vec::new(),
        }
    }

    fn degrade(&self, error: &PricingError, fallback: &str) {
        warn!(error = %error, fallback, "storage read failed, degrading");
        let event = DegradationEvent::now(STORAGE_COMPONENT, error.to_string(), fallback);
        self.observe(|obs| obs.record_degradation(event));
    }

    /// Counters are best effort; a poisoned lock skips the update.
    fn observe(&self, f: impl FnOnce(&mut ObservabilityEngine)) {
        if let Ok(mut obs) = self.observability.lock() {
            f(&mut obs);
        }
    }
}

fn contractor(contractor_id: &str) -> PricingResult<&str> {
    let trimmed = contractor_id.trim();
    if trimmed.is_empty() {
        return Err(PricingError::Validation {
            field: "contractor_id".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(trimmed)
}

fn category_key(contractor_id: &str, category: &str) -> PricingResult<CategoryKey> {
    let key = CategoryKey::new(contractor(contractor_id)?, category);
    if key.category.is_empty() {
        return Err(PricingError::Validation {
            field: "category".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(key)
}
