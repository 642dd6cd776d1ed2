use chrono::{DateTime, Utc};

use pricewise_core::config::ConfidenceConfig;
use pricewise_core::knowledge::PricingKnowledge;
use pricewise_core::models::{
    CategoryConfidence, ConfidenceLabel, ConfidenceLevel, ConfidenceScore,
};

use crate::formula::{self, ConfidenceBreakdown};
use crate::label::label_for;

/// Computes confidence outputs from a pricing knowledge entry.
///
/// The label and the continuous score are derived from different fields
/// (`correction_count` vs. the stored `confidence`) and never from each other.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceEstimator {
    config: ConfidenceConfig,
}

impl ConfidenceEstimator {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfidenceConfig {
        &self.config
    }

    /// Trust label for a correction count.
    pub fn label(&self, correction_count: u32) -> ConfidenceLabel {
        label_for(correction_count, &self.config)
    }

    /// Read-side view of a category: stored score, its tier, and the label.
    pub fn category_confidence(&self, knowledge: &PricingKnowledge) -> CategoryConfidence {
        let stored = knowledge.confidence;
        CategoryConfidence {
            confidence_level: ConfidenceLevel::from_confidence(stored),
            confidence_label: self.label(knowledge.correction_count),
            continuous_score: stored.value(),
        }
    }

    /// What an unknown or unreadable category reports.
    pub fn unknown_category(&self) -> CategoryConfidence {
        CategoryConfidence {
            confidence_level: ConfidenceLevel::Low,
            confidence_label: ConfidenceLabel::LimitedData,
            continuous_score: 0.0,
        }
    }

    /// Blended score for the explanation tracer. Not stored.
    pub fn score(&self, knowledge: &PricingKnowledge, now: DateTime<Utc>) -> ConfidenceScore {
        let score = formula::compute(knowledge, now, &self.config);
        tracing::debug!(
            category = %knowledge.key.category,
            overall = score.overall,
            "blended confidence"
        );
        score
    }

    pub fn breakdown(
        &self,
        knowledge: &PricingKnowledge,
        now: DateTime<Utc>,
    ) -> ConfidenceBreakdown {
        formula::compute_breakdown(knowledge, now, &self.config)
    }
}
