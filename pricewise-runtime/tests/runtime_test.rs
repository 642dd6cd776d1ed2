//! End-to-end tests through the collaborator-facing runtime.

use pricewise_core::errors::{PricingError, PricingResult, StorageError};
use pricewise_core::knowledge::{CategoryKey, PricingKnowledge};
use pricewise_core::models::{
    BoundsSource, CandidateQuote, ComponentSource, ConfidenceLabel, LineItem, QuoteSnapshot,
    SanityAction, UncertaintyKind,
};
use pricewise_core::traits::IKnowledgeStore;
use pricewise_explain::ExplainContext;
use pricewise_runtime::{PricingRuntime, RuntimeOptions};
use std::sync::Arc;

const CONTRACTOR: &str = "contractor-1";

const HISTORY: [f64; 20] = [
    8200.0, 6000.0, 9500.0, 7000.0, 10400.0, 6400.0, 8800.0, 7400.0, 10000.0, 6800.0, 9200.0,
    7800.0, 6200.0, 8600.0, 7200.0, 9000.0, 6600.0, 8000.0, 7600.0, 8400.0,
];

fn runtime() -> PricingRuntime {
    PricingRuntime::new(RuntimeOptions::in_memory()).unwrap()
}

fn quote(subtotal: f64) -> QuoteSnapshot {
    QuoteSnapshot::new(vec![LineItem::new("Labor", subtotal)], subtotal)
}

fn candidate(category: &str, subtotal: f64) -> CandidateQuote {
    CandidateQuote {
        subtotal,
        line_items: vec![LineItem::new("Labor", subtotal)],
        job_category: category.to_string(),
    }
}

#[test]
fn scenario_a_empty_history_passes_under_global_envelope() {
    let rt = runtime();
    let v = rt.check_quote_sanity(50_000.0, "deck", CONTRACTOR).unwrap();
    assert_eq!(v.action, SanityAction::Pass);
    assert!(v.is_sane);
    assert_eq!(v.bounds.source, BoundsSource::GlobalFallback);
    assert_eq!(v.bounds.warning_threshold, 250_000.0);
    assert_eq!(v.bounds.block_threshold, 500_000.0);
}

#[test]
fn scenarios_b_and_c_use_category_history() {
    let rt = runtime();
    for total in HISTORY {
        rt.record_finalized_quote(CONTRACTOR, "deck", total).unwrap();
    }

    let warn = rt.check_quote_sanity(35_000.0, "Deck", CONTRACTOR).unwrap();
    assert_eq!(warn.action, SanityAction::Warn);
    assert_eq!(warn.bounds.p95, 10_000.0);
    assert_eq!(warn.bounds.warning_threshold, 30_000.0);
    assert_eq!(warn.bounds.block_threshold, 100_000.0);

    let block = rt.check_quote_sanity(120_000.0, "deck", CONTRACTOR).unwrap();
    assert_eq!(block.action, SanityAction::Block);
    assert!(!block.is_sane);
    let err = block.into_result().unwrap_err();
    assert_eq!(err.code(), "BLOCKED_PRICING");
    assert!(err.is_retryable());

    let snapshot = rt.metrics_snapshot().unwrap();
    assert_eq!(snapshot["metrics"]["sanity"]["warned"], 1);
    assert_eq!(snapshot["metrics"]["sanity"]["blocked"], 1);
}

#[test]
fn scenario_d_first_correction_creates_category() {
    let rt = runtime();
    let outcome = rt
        .process_correction(
            CONTRACTOR,
            "fence_wood",
            &quote(4_000.0),
            &quote(4_400.0),
            Some("Add 10% for sloped yards."),
        )
        .unwrap();
    assert!(outcome.has_changes);
    assert!(outcome.created);
    assert_eq!(outcome.corrections.total_change, 400.0);
    assert_eq!(outcome.corrections.total_change_percent, 10.0);
    assert_eq!(outcome.learnings, vec!["Add 10% for sloped yards"]);

    let c = rt.get_category_confidence(CONTRACTOR, "fence_wood").unwrap();
    assert!((c.continuous_score - 0.32).abs() < 1e-9);
    assert_eq!(c.confidence_label, ConfidenceLabel::LimitedData);

    let listed = rt.list_categories(CONTRACTOR).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].sample_count, 1);
    assert_eq!(listed[0].correction_count, 1);
}

#[test]
fn scenario_e_label_turns_good_at_five_corrections() {
    let rt = runtime();
    let mut correct = |i: u32| {
        let base = 20_000.0 + f64::from(i) * 100.0;
        rt.process_correction(
            CONTRACTOR,
            "kitchen_remodel",
            &quote(base),
            &quote(base + 500.0),
            None,
        )
        .unwrap();
    };
    for i in 0..4 {
        correct(i);
    }
    let before = rt.get_category_confidence(CONTRACTOR, "kitchen_remodel").unwrap();
    assert_eq!(before.confidence_label, ConfidenceLabel::Learning);

    correct(4);
    let after = rt.get_category_confidence(CONTRACTOR, "kitchen_remodel").unwrap();
    let again = rt.get_category_confidence(CONTRACTOR, "kitchen_remodel").unwrap();
    assert_eq!(after.confidence_label, ConfidenceLabel::Good);
    assert_eq!(after.continuous_score, again.continuous_score);

    let stored = rt.list_categories(CONTRACTOR).unwrap();
    assert_eq!(stored[0].correction_count, 5);
    assert_eq!(after.continuous_score, stored[0].confidence.value());
}

#[test]
fn unchanged_quote_is_a_no_op() {
    let rt = runtime();
    let outcome = rt
        .process_correction(CONTRACTOR, "deck", &quote(9_000.0), &quote(9_000.0), None)
        .unwrap();
    assert!(!outcome.has_changes);
    assert!(rt.list_categories(CONTRACTOR).unwrap().is_empty());
}

#[test]
fn explanation_borrows_from_related_category_then_learns() {
    let rt = runtime();
    rt.process_correction(CONTRACTOR, "deck", &quote(15_000.0), &quote(16_000.0), None)
        .unwrap();

    let patio = rt
        .explain_quote(CONTRACTOR, &candidate("Patio", 14_000.0), &ExplainContext::default())
        .unwrap();
    let base = patio.base_component().unwrap();
    assert_eq!(base.source, ComponentSource::DnaTransfer);
    assert_eq!(base.rule_ref.as_deref(), Some("deck"));
    assert_eq!(patio.dna_transfers.len(), 1);
    assert_eq!(patio.confidence_label, ConfidenceLabel::LimitedData);
    assert!(patio.has_uncertainty(UncertaintyKind::FirstTimeCategory));

    let deck = rt
        .explain_quote(CONTRACTOR, &candidate("deck", 16_500.0), &ExplainContext::default())
        .unwrap();
    assert_eq!(deck.base_component().unwrap().source, ComponentSource::Learned);
    assert!(deck.dna_transfers.is_empty());
    assert!(deck.confidence.overall > 0.0);
    assert_eq!(deck.component_total(), 16_500.0);

    let json = serde_json::to_value(&deck).unwrap();
    assert_eq!(json["components"][0]["source"], "learned");
}

#[test]
fn explanation_is_deterministic_for_fixed_as_of() {
    let rt = runtime();
    rt.process_correction(CONTRACTOR, "deck", &quote(10_000.0), &quote(11_000.0), None)
        .unwrap();
    let context = ExplainContext {
        notes: Some("Rush job, customer needs it ASAP".to_string()),
        applied_adjustments: vec!["Add 15% for second-story work".to_string()],
        as_of: Some(chrono::Utc::now()),
        ..ExplainContext::default()
    };
    let q = candidate("deck", 13_000.0);
    let a = rt.explain_quote(CONTRACTOR, &q, &context).unwrap();
    let b = rt.explain_quote(CONTRACTOR, &q, &context).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.components.len(), 3);
}

#[test]
fn seed_and_remove_categories() {
    let rt = runtime();
    let seeded = rt.seed_category(CONTRACTOR, "Roofing", Some(12_000.0)).unwrap();
    assert_eq!(seeded.base_rate, Some(12_000.0));
    assert_eq!(seeded.sample_count, 0);

    let again = rt.seed_category(CONTRACTOR, "roofing", Some(99.0)).unwrap();
    assert_eq!(again.base_rate, Some(12_000.0));

    assert!(rt.remove_category(CONTRACTOR, "roofing").unwrap());
    assert!(!rt.remove_category(CONTRACTOR, "roofing").unwrap());
    assert!(rt.list_categories(CONTRACTOR).unwrap().is_empty());
}

#[test]
fn blank_identifiers_are_validation_errors() {
    let rt = runtime();
    let err = rt.check_quote_sanity(100.0, "deck", "").unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    let err = rt.get_category_confidence(CONTRACTOR, "   ").unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[test]
fn knowledge_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricewise.db");
    {
        let rt = PricingRuntime::new(RuntimeOptions::in_memory().with_db_path(&path)).unwrap();
        rt.process_correction(CONTRACTOR, "fence_wood", &quote(4_000.0), &quote(4_400.0), None)
            .unwrap();
    }
    let rt = PricingRuntime::new(RuntimeOptions::in_memory().with_db_path(&path)).unwrap();
    let c = rt.get_category_confidence(CONTRACTOR, "fence_wood").unwrap();
    assert!((c.continuous_score - 0.32).abs() < 1e-9);
}

struct UnavailableStore;

fn unavailable<T>() -> PricingResult<T> {
    Err(PricingError::Storage(StorageError::SqliteError {
        message: "database is locked".to_string(),
    }))
}

impl IKnowledgeStore for UnavailableStore {
    fn get_pricing_knowledge(&self, _: &CategoryKey) -> PricingResult<Option<PricingKnowledge>> {
        unavailable()
    }
    fn save_pricing_knowledge(&self, _: &PricingKnowledge, _: u64) -> PricingResult<u64> {
        unavailable()
    }
    fn delete_pricing_knowledge(&self, _: &CategoryKey) -> PricingResult<bool> {
        unavailable()
    }
    fn list_categories(&self, _: &str) -> PricingResult<Vec<PricingKnowledge>> {
        unavailable()
    }
    fn get_historical_totals(&self, _: &CategoryKey) -> PricingResult<Vec<f64>> {
        unavailable()
    }
    fn record_historical_total(&self, _: &CategoryKey, _: f64) -> PricingResult<()> {
        unavailable()
    }
}

#[test]
fn read_paths_degrade_when_storage_fails() {
    let rt = PricingRuntime::new(RuntimeOptions::in_memory().with_store(Arc::new(UnavailableStore)))
        .unwrap();

    let v = rt.check_quote_sanity(50_000.0, "deck", CONTRACTOR).unwrap();
    assert_eq!(v.action, SanityAction::Pass);
    assert_eq!(v.bounds.source, BoundsSource::GlobalFallback);

    let c = rt.get_category_confidence(CONTRACTOR, "deck").unwrap();
    assert_eq!(c.continuous_score, 0.0);
    assert_eq!(c.confidence_label, ConfidenceLabel::LimitedData);

    let e = rt
        .explain_quote(CONTRACTOR, &candidate("deck", 9_000.0), &ExplainContext::default())
        .unwrap();
    assert_eq!(e.base_component().unwrap().source, ComponentSource::Default);

    let err = rt
        .process_correction(CONTRACTOR, "deck", &quote(9_000.0), &quote(9_500.0), None)
        .unwrap_err();
    assert_eq!(err.code(), "STORAGE_ERROR");

    let snapshot = rt.metrics_snapshot().unwrap();
    assert_eq!(snapshot["metrics"]["sanity"]["storage_fallbacks"], 1);
    let storage = &snapshot["degradations"]["storage"];
    assert_eq!(storage["open"], 3);
    assert_eq!(storage["recent"].as_array().map(Vec::len), Some(3));
    let degraded = rt.degraded_components();
    assert_eq!(degraded.len(), 1);
    assert_eq!(degraded[0].current_fallback(), Some("default_base_rate"));
}

/// History reads fail until `fail_reads` runs out.
struct FlakyHistoryStore {
    inner: pricewise_storage::InMemoryKnowledgeStore,
    fail_reads: std::sync::atomic::AtomicUsize,
}

impl IKnowledgeStore for FlakyHistoryStore {
    fn get_pricing_knowledge(&self, key: &CategoryKey) -> PricingResult<Option<PricingKnowledge>> {
        self.inner.get_pricing_knowledge(key)
    }
    fn save_pricing_knowledge(&self, k: &PricingKnowledge, expected: u64) -> PricingResult<u64> {
        self.inner.save_pricing_knowledge(k, expected)
    }
    fn delete_pricing_knowledge(&self, key: &CategoryKey) -> PricingResult<bool> {
        self.inner.delete_pricing_knowledge(key)
    }
    fn list_categories(&self, contractor_id: &str) -> PricingResult<Vec<PricingKnowledge>> {
        self.inner.list_categories(contractor_id)
    }
    fn get_historical_totals(&self, key: &CategoryKey) -> PricingResult<Vec<f64>> {
        use std::sync::atomic::Ordering;
        let left = self.fail_reads.load(Ordering::SeqCst);
        if left > 0 {
            self.fail_reads.store(left - 1, Ordering::SeqCst);
            return unavailable();
        }
        self.inner.get_historical_totals(key)
    }
    fn record_historical_total(&self, key: &CategoryKey, total: f64) -> PricingResult<()> {
        self.inner.record_historical_total(key, total)
    }
}

#[test]
fn storage_recovers_after_a_successful_history_read() {
    let store = Arc::new(FlakyHistoryStore {
        inner: pricewise_storage::InMemoryKnowledgeStore::new(),
        fail_reads: std::sync::atomic::AtomicUsize::new(2),
    });
    let rt = PricingRuntime::new(RuntimeOptions::in_memory().with_store(store)).unwrap();

    rt.check_quote_sanity(9_000.0, "deck", CONTRACTOR).unwrap();
    rt.check_quote_sanity(9_000.0, "deck", CONTRACTOR).unwrap();
    assert_eq!(rt.degraded_components().len(), 1);

    let v = rt.check_quote_sanity(9_000.0, "deck", CONTRACTOR).unwrap();
    assert_eq!(v.action, SanityAction::Pass);
    assert!(rt.degraded_components().is_empty());

    let snapshot = rt.metrics_snapshot().unwrap();
    let storage = &snapshot["degradations"]["storage"];
    assert_eq!(storage["total"], 2);
    assert_eq!(storage["open"], 0);
    assert!(storage["last_recovered_at"].is_string());
    assert_eq!(snapshot["metrics"]["sanity"]["storage_fallbacks"], 2);
}
