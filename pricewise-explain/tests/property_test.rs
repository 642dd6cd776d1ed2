//! Property tests: explanations reconcile to the subtotal and are deterministic.

use chrono::{TimeZone, Utc};
use pricewise_core::models::{CandidateQuote, ConfidenceLabel, ConfidenceScore, LineItem};
use pricewise_explain::{ExplainContext, ExplanationTracer};
use proptest::prelude::*;

fn quote(subtotal: f64) -> CandidateQuote {
    CandidateQuote {
        subtotal,
        line_items: vec![LineItem::new("Labor", subtotal)],
        job_category: "deck".to_string(),
    }
}

fn context(percents: &[u8], notes: &str) -> ExplainContext {
    ExplainContext {
        notes: Some(notes.to_string()),
        voice_transcript: None,
        applied_adjustments: percents
            .iter()
            .enumerate()
            .map(|(i, p)| format!("Add {p}% for condition {i}"))
            .collect(),
        as_of: Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
    }
}

proptest! {
    #[test]
    fn components_sum_to_subtotal(
        cents in 0u64..100_000_000,
        percents in prop::collection::vec(0u8..60, 0..5),
        rush in any::<bool>(),
    ) {
        let subtotal = cents as f64 / 100.0;
        let notes = if rush { "rush job" } else { "standard" };
        let e = ExplanationTracer::default().explain(
            &quote(subtotal),
            &context(&percents, notes),
            None,
            &[],
            ConfidenceScore::none(),
            ConfidenceLabel::LimitedData,
        );
        prop_assert!((e.component_total() - subtotal).abs() <= 0.01);
        prop_assert_eq!(e.components.len(), 1 + percents.len() + usize::from(rush));
    }

    #[test]
    fn identical_inputs_give_identical_explanations(
        cents in 0u64..10_000_000,
        percents in prop::collection::vec(0u8..40, 0..4),
    ) {
        let tracer = ExplanationTracer::default();
        let q = quote(cents as f64 / 100.0);
        let ctx = context(&percents, "weekend work");
        let label = ConfidenceLabel::LimitedData;
        let a = tracer.explain(&q, &ctx, None, &[], ConfidenceScore::none(), label);
        let b = tracer.explain(&q, &ctx, None, &[], ConfidenceScore::none(), label);
        prop_assert_eq!(a, b);
    }
}
