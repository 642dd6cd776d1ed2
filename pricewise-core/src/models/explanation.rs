use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{ConfidenceLabel, ConfidenceScore};

/// Typed unit of a price breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    BaseRate,
    Modifier,
    Adjustment,
    VoiceSignal,
}

/// Provenance of a component amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ComponentSource {
    /// The category's own learned base rate.
    Learned,
    /// Borrowed from a related category with history.
    DnaTransfer,
    /// No history anywhere; generator default.
    Default,
    /// A learned adjustment statement of this category.
    LearnedAdjustment,
    /// A rule inherited from another category.
    UniversalPattern,
    /// Detected in typed notes.
    TextSignal,
    /// Detected in a voice transcript.
    VoiceSignal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingComponent {
    pub kind: ComponentKind,
    pub label: String,
    pub amount: f64,
    /// Relative size for percentage-driven components.
    pub percent: Option<f64>,
    pub source: ComponentSource,
    pub confidence: f64,
    /// The rule statement (or donor category) that produced this component.
    pub rule_ref: Option<String>,
    /// Rate the base component is anchored to, when one is known.
    pub reference_rate: Option<f64>,
}

/// An adjustment validated often enough to be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrustedPattern {
    pub statement: String,
    pub times_validated: u32,
    pub percent: Option<f64>,
}

/// A base rate borrowed from a related category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DnaTransfer {
    pub source_category: String,
    pub source_base_rate: f64,
    pub transferred_rate: f64,
    pub source_sample_count: u32,
    pub discount: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintyKind {
    SparseData,
    LargeCorrections,
    StaleData,
    FirstTimeCategory,
    LargeProject,
    UnquantifiedAdjustments,
}

/// An explicit reason the estimate should be treated with caution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Uncertainty {
    pub kind: UncertaintyKind,
    pub message: String,
}

/// Auditable explanation of a final price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingExplanation {
    pub category: String,
    pub total: f64,
    pub components: Vec<PricingComponent>,
    pub patterns_applied: Vec<TrustedPattern>,
    pub dna_transfers: Vec<DnaTransfer>,
    /// Adjustments without a parseable percentage: shown, not priced.
    pub unquantified_adjustments: Vec<String>,
    pub uncertainties: Vec<Uncertainty>,
    pub confidence: ConfidenceScore,
    pub confidence_label: ConfidenceLabel,
    pub summary: String,
}

impl PricingExplanation {
    /// Sum of all component amounts.
    pub fn component_total(&self) -> f64 {
        self.components.iter().map(|c| c.amount).sum()
    }

    /// The base-rate component, if any.
    pub fn base_component(&self) -> Option<&PricingComponent> {
        self.components
            .iter()
            .find(|c| c.kind == ComponentKind::BaseRate)
    }

    pub fn has_uncertainty(&self, kind: UncertaintyKind) -> bool {
        self.uncertainties.iter().any(|u| u.kind == kind)
    }
}
