use serde::{Deserialize, Serialize};

use super::defaults;

/// Knowledge updater configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Weight kept by the previous base rate in the recency-weighted blend.
    pub blend_weight_old: f64,
    /// Fixed confidence increase per applied correction.
    pub confidence_step: f64,
    /// Confidence of a freshly created category entry.
    pub initial_confidence: f64,
    /// How many correction fingerprints are retained for replay detection.
    pub max_applied_fingerprints: usize,
    /// A related category's adjustment validated this many times is inherited
    /// as a universal pattern when a new category is created.
    pub inherit_min_validations: u32,
    /// Upper bound for the confidence carried by an inherited pattern.
    pub inherited_confidence_cap: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            blend_weight_old: defaults::DEFAULT_BLEND_WEIGHT_OLD,
            confidence_step: defaults::DEFAULT_CONFIDENCE_STEP,
            initial_confidence: defaults::DEFAULT_INITIAL_CONFIDENCE,
            max_applied_fingerprints: defaults::DEFAULT_MAX_APPLIED_FINGERPRINTS,
            inherit_min_validations: defaults::DEFAULT_TRUSTED_PATTERN_THRESHOLD,
            inherited_confidence_cap: defaults::DEFAULT_DNA_CONFIDENCE,
        }
    }
}
