use serde::{Deserialize, Serialize};

use super::defaults;

/// External correction-analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Hard upper bound on a single analyzer call.
    pub timeout_ms: u64,
    /// Analyzer calls allowed to outlive their timeout at once.
    pub max_in_flight: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            timeout_ms: defaults::DEFAULT_ENRICHMENT_TIMEOUT_MS,
            max_in_flight: defaults::DEFAULT_MAX_ANALYZER_IN_FLIGHT,
        }
    }
}
