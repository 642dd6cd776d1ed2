//! ExplanationTracer: builds a `PricingExplanation` for a final quote.

use pricewise_core::config::ExplainConfig;
use pricewise_core::constants::round_cents;
use pricewise_core::knowledge::{normalize_category, PricingKnowledge};
use pricewise_core::models::{
    CandidateQuote, ComponentKind, ComponentSource, ConfidenceLabel, ConfidenceScore,
    PricingComponent, PricingExplanation, TrustedPattern,
};

use crate::attribution::{attribute_base, BaseAttribution};
use crate::context::ExplainContext;
use crate::decompose::{decompose, Decomposition};
use crate::parse::parse_percent;
use crate::signals::{detect_signals, SignalOrigin, SIGNAL_CONFIDENCE};
use crate::summary::summarize;
use crate::uncertainty::detect_uncertainties;

/// A percentage-driven line waiting for its dollar amount.
struct PendingModifier {
    kind: ComponentKind,
    label: String,
    fraction: f64,
    source: ComponentSource,
    confidence: f64,
    rule_ref: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExplanationTracer {
    config: ExplainConfig,
}

impl ExplanationTracer {
    pub fn new(config: ExplainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    /// Explain a final quote.
    ///
    /// `knowledge` is the category's own entry, `related` the contractor's
    /// other entries (transfer candidates), `confidence` and `label` the
    /// estimator's outputs for the category.
    pub fn explain(
        &self,
        quote: &CandidateQuote,
        context: &ExplainContext,
        knowledge: Option<&PricingKnowledge>,
        related: &[PricingKnowledge],
        confidence: ConfidenceScore,
        confidence_label: ConfidenceLabel,
    ) -> PricingExplanation {
        let category = normalize_category(&quote.job_category);
        let total = usable_total(quote);
        let base = attribute_base(&category, knowledge, related, &self.config);

        let (mut pending, patterns_applied, mut unquantified) =
            self.adjustments(&context.applied_adjustments, knowledge, &base);
        pending.extend(signal_modifiers(context));

        let fractions: Vec<f64> = pending.iter().map(|m| m.fraction).collect();
        let decomposition = match decompose(total, &fractions) {
            Some(d) => d,
            None => {
                tracing::debug!(category = %category, "modifiers exceed subtotal, shown as text");
                unquantified.extend(pending.drain(..).map(|m| m.label));
                Decomposition {
                    base: total,
                    modifiers: Vec::new(),
                }
            }
        };

        let mut components = Vec::with_capacity(pending.len() + 1);
        components.push(base_component(&base, decomposition.base));
        for (m, amount) in pending.into_iter().zip(decomposition.modifiers) {
            components.push(PricingComponent {
                kind: m.kind,
                label: m.label,
                amount,
                percent: Some(round_cents(m.fraction * 100.0)),
                source: m.source,
                confidence: m.confidence,
                rule_ref: m.rule_ref,
                reference_rate: None,
            });
        }

        let uncertainties = detect_uncertainties(
            knowledge,
            &base,
            total,
            unquantified.len(),
            context.as_of,
            &self.config,
        );
        let summary = summarize(
            &category,
            total,
            &base,
            &components,
            unquantified.len(),
            &uncertainties,
        );

        PricingExplanation {
            category,
            total,
            components,
            patterns_applied,
            dna_transfers: base.transfer.into_iter().collect(),
            unquantified_adjustments: unquantified,
            uncertainties,
            confidence,
            confidence_label,
            summary,
        }
    }

    /// Classify applied adjustment statements: priced modifiers, trusted
    /// patterns, and statements without a percentage.
    fn adjustments(
        &self,
        applied: &[String],
        knowledge: Option<&PricingKnowledge>,
        base: &BaseAttribution,
    ) -> (Vec<PendingModifier>, Vec<TrustedPattern>, Vec<String>) {
        let mut pending = Vec::new();
        let mut trusted = Vec::new();
        let mut unquantified: Vec<String> = Vec::new();
        let mut seen: Vec<&str> = Vec::new();

        for statement in applied.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if seen.contains(&statement) {
                continue;
            }
            seen.push(statement);

            let fraction = parse_percent(statement);
            let learned = knowledge.and_then(|k| k.adjustment(statement));
            let inherited = knowledge.and_then(|k| k.universal_pattern(statement));

            if let Some(adj) = learned {
                if adj.times_validated >= self.config.trusted_pattern_threshold {
                    trusted.push(TrustedPattern {
                        statement: statement.to_string(),
                        times_validated: adj.times_validated,
                        percent: fraction.map(|f| round_cents(f * 100.0)),
                    });
                }
            }

            let Some(fraction) = fraction else {
                unquantified.push(statement.to_string());
                continue;
            };

            let (source, confidence, rule_ref) = match (learned, inherited) {
                (Some(_), _) => (
                    ComponentSource::LearnedAdjustment,
                    knowledge.map_or(base.confidence, |k| k.confidence.value()),
                    Some(statement.to_string()),
                ),
                (None, Some(pattern)) => (
                    ComponentSource::UniversalPattern,
                    pattern.inherited_confidence,
                    Some(pattern.source_category.clone()),
                ),
                (None, None) => (
                    ComponentSource::LearnedAdjustment,
                    self.config.fallback_confidence,
                    None,
                ),
            };

            pending.push(PendingModifier {
                kind: ComponentKind::Adjustment,
                label: statement.to_string(),
                fraction,
                source,
                confidence,
                rule_ref,
            });
        }

        (pending, trusted, unquantified)
    }
}

fn signal_modifiers(context: &ExplainContext) -> Vec<PendingModifier> {
    let signals = detect_signals(context.notes.as_deref(), context.voice_transcript.as_deref());
    let (text, voice): (Vec<_>, Vec<_>) = signals
        .into_iter()
        .partition(|s| s.origin == SignalOrigin::Text);

    text.into_iter()
        .chain(voice)
        .map(|s| {
            let (kind, source) = match s.origin {
                SignalOrigin::Text => (ComponentKind::Modifier, ComponentSource::TextSignal),
                SignalOrigin::Voice => (ComponentKind::VoiceSignal, ComponentSource::VoiceSignal),
            };
            PendingModifier {
                kind,
                label: s.label.to_string(),
                fraction: s.percent,
                source,
                confidence: SIGNAL_CONFIDENCE,
                rule_ref: Some(s.name.to_string()),
            }
        })
        .collect()
}

fn base_component(base: &BaseAttribution, amount: f64) -> PricingComponent {
    let label = match base.source {
        ComponentSource::Learned => "Base rate (learned)".to_string(),
        ComponentSource::DnaTransfer => format!(
            "Base rate (from {})",
            base.rule_ref.as_deref().unwrap_or("related category")
        ),
        _ => "Base rate (default)".to_string(),
    };
    PricingComponent {
        kind: ComponentKind::BaseRate,
        label,
        amount,
        percent: None,
        source: base.source,
        confidence: base.confidence,
        rule_ref: base.rule_ref.clone(),
        reference_rate: base.reference_rate,
    }
}

/// The subtotal, or the line-item sum when the subtotal is unusable.
fn usable_total(quote: &CandidateQuote) -> f64 {
    if quote.subtotal.is_finite() && quote.subtotal >= 0.0 {
        return round_cents(quote.subtotal);
    }
    let items: f64 = quote
        .line_items
        .iter()
        .filter(|i| i.amount.is_finite() && i.amount >= 0.0)
        .map(|i| i.amount)
        .sum();
    round_cents(items)
}
