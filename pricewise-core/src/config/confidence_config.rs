use serde::{Deserialize, Serialize};

use super::defaults;

/// Confidence estimator configuration.
///
/// The blend weights are part of the persisted-state strategy: changing them
/// changes every blended score, so they should stay fixed for a given store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Upper bound for every confidence value.
    pub ceiling: f64,
    /// Sample count at which data confidence reaches ~63% of its ceiling.
    pub data_saturation: f64,
    /// Average absolute edit size (%) at which accuracy confidence halves.
    pub accuracy_scale_percent: f64,
    /// Recency decay constant in days: `e^(-days / this)`.
    pub recency_half_life_days: f64,
    pub weight_data: f64,
    pub weight_accuracy: f64,
    pub weight_recency: f64,
    /// Correction count at which the label becomes "Learning".
    pub label_learning_at: u32,
    /// Correction count at which the label becomes "Good".
    pub label_good_at: u32,
    /// Correction count at which the label becomes "High Confidence".
    pub label_high_at: u32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            ceiling: defaults::DEFAULT_CONFIDENCE_CEILING,
            data_saturation: defaults::DEFAULT_DATA_SATURATION,
            accuracy_scale_percent: defaults::DEFAULT_ACCURACY_SCALE_PERCENT,
            recency_half_life_days: defaults::DEFAULT_RECENCY_HALF_LIFE_DAYS,
            weight_data: defaults::DEFAULT_WEIGHT_DATA,
            weight_accuracy: defaults::DEFAULT_WEIGHT_ACCURACY,
            weight_recency: defaults::DEFAULT_WEIGHT_RECENCY,
            label_learning_at: defaults::DEFAULT_LABEL_LEARNING_AT,
            label_good_at: defaults::DEFAULT_LABEL_GOOD_AT,
            label_high_at: defaults::DEFAULT_LABEL_HIGH_AT,
        }
    }
}

impl ConfidenceConfig {
    /// Sum of the three blend weights.
    pub fn weight_sum(&self) -> f64 {
        self.weight_data + self.weight_accuracy + self.weight_recency
    }
}
