use serde::{Deserialize, Serialize};

use super::defaults;

/// Explanation tracer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// Validations needed before an adjustment is a trusted pattern.
    pub trusted_pattern_threshold: u32,
    /// Confidence of a base rate borrowed from a related category.
    pub dna_confidence: f64,
    /// Discount applied to a borrowed base rate (0.125 = 12.5%).
    pub dna_discount: f64,
    /// Confidence of the default (no history) base rate.
    pub fallback_confidence: f64,
    /// Below this sample count the explanation reports sparse data.
    pub sparse_sample_threshold: u32,
    /// Average absolute correction (%) above which corrections are "large".
    pub large_correction_percent: f64,
    /// Knowledge not updated for this many days is stale.
    pub stale_after_days: i64,
    /// Subtotal above base_rate × this is an unusually large project.
    pub large_project_ratio: f64,
    /// Without a base rate, subtotal above this is an unusually large project.
    pub large_project_absolute: f64,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            trusted_pattern_threshold: defaults::DEFAULT_TRUSTED_PATTERN_THRESHOLD,
            dna_confidence: defaults::DEFAULT_DNA_CONFIDENCE,
            dna_discount: defaults::DEFAULT_DNA_DISCOUNT,
            fallback_confidence: defaults::DEFAULT_FALLBACK_CONFIDENCE,
            sparse_sample_threshold: defaults::DEFAULT_SPARSE_SAMPLE_THRESHOLD,
            large_correction_percent: defaults::DEFAULT_LARGE_CORRECTION_PERCENT,
            stale_after_days: defaults::DEFAULT_STALE_AFTER_DAYS,
            large_project_ratio: defaults::DEFAULT_LARGE_PROJECT_RATIO,
            large_project_absolute: defaults::DEFAULT_LARGE_PROJECT_ABSOLUTE,
        }
    }
}
