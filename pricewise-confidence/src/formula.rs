use chrono::{DateTime, Utc};

use pricewise_core::config::ConfidenceConfig;
use pricewise_core::knowledge::PricingKnowledge;
use pricewise_core::models::ConfidenceScore;

use crate::factors;

/// Weighted additive blend, recomputed from persisted state on every read.
///
/// ```text
/// overall = w_data × data + w_accuracy × accuracy + w_recency × recency
/// ```
///
/// Result is clamped to [0.0, ceiling].
pub fn compute(
    knowledge: &PricingKnowledge,
    now: DateTime<Utc>,
    config: &ConfidenceConfig,
) -> ConfidenceScore {
    compute_breakdown(knowledge, now, config).into_score()
}

/// Each factor with its weighted contribution, for debugging and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBreakdown {
    pub data: f64,
    pub accuracy: f64,
    pub recency: f64,
    pub weighted_data: f64,
    pub weighted_accuracy: f64,
    pub weighted_recency: f64,
    pub overall: f64,
}

impl ConfidenceBreakdown {
    pub fn into_score(self) -> ConfidenceScore {
        ConfidenceScore {
            data_confidence: self.data,
            accuracy_confidence: self.accuracy,
            recency_confidence: self.recency,
            overall: self.overall,
        }
    }
}

pub fn compute_breakdown(
    knowledge: &PricingKnowledge,
    now: DateTime<Utc>,
    config: &ConfidenceConfig,
) -> ConfidenceBreakdown {
    let data = factors::data::calculate(knowledge.sample_count, config.data_saturation);
    let accuracy = factors::accuracy::calculate(
        knowledge.correction_count,
        knowledge.avg_abs_change_percent,
        config.accuracy_scale_percent,
    );
    let recency = factors::recency::calculate(
        knowledge.sample_count,
        knowledge.updated_at,
        now,
        config.recency_half_life_days,
    );

    let weighted_data = config.weight_data * data;
    let weighted_accuracy = config.weight_accuracy * accuracy;
    let weighted_recency = config.weight_recency * recency;
    let overall = (weighted_data + weighted_accuracy + weighted_recency).clamp(0.0, config.ceiling);

    ConfidenceBreakdown {
        data,
        accuracy,
        recency,
        weighted_data,
        weighted_accuracy,
        weighted_recency,
        overall,
    }
}
