use serde::{Deserialize, Serialize};

use super::defaults;

/// Sanity guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Fewer historical totals than this falls back to the global envelope.
    pub min_samples: usize,
    /// Lower edge of the global envelope.
    pub global_min_total: f64,
    /// Upper edge of the global envelope; also the fallback block threshold.
    pub global_max_total: f64,
    /// Fallback warning threshold as a fraction of `global_max_total`.
    pub global_warning_ratio: f64,
    /// Category warning threshold = P95 × this.
    pub warning_multiplier: f64,
    /// Category block threshold = P95 × this.
    pub block_multiplier: f64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            min_samples: defaults::DEFAULT_MIN_HISTORY_SAMPLES,
            global_min_total: defaults::DEFAULT_GLOBAL_MIN_TOTAL,
            global_max_total: defaults::DEFAULT_GLOBAL_MAX_TOTAL,
            global_warning_ratio: defaults::DEFAULT_GLOBAL_WARNING_RATIO,
            warning_multiplier: defaults::DEFAULT_WARNING_MULTIPLIER,
            block_multiplier: defaults::DEFAULT_BLOCK_MULTIPLIER,
        }
    }
}
