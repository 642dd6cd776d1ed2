//! Per-operation counters.

use pricewise_core::models::SanityAction;
use serde::Serialize;

/// Sanity verdict counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SanityMetrics {
    pub checks: u64,
    pub passed: u64,
    pub warned: u64,
    pub blocked: u64,
    /// Checks answered from the global envelope because history was unreadable.
    pub storage_fallbacks: u64,
}

impl SanityMetrics {
    pub fn record(&mut self, action: SanityAction) {
        self.checks += 1;
        match action {
            SanityAction::Pass => self.passed += 1,
            SanityAction::Warn => self.warned += 1,
            SanityAction::Block => self.blocked += 1,
        }
    }

    /// Share of checks that were blocked.
    pub fn block_rate(&self) -> f64 {
        if self.checks == 0 {
            return 0.0;
        }
        self.blocked as f64 / self.checks as f64
    }
}

/// Correction processing counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LearningMetrics {
    pub corrections: u64,
    pub unchanged: u64,
    pub replayed: u64,
    pub categories_created: u64,
    pub enrichment_fallbacks: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsCollector {
    pub sanity: SanityMetrics,
    pub learning: LearningMetrics,
    pub explanations: u64,
    pub confidence_reads: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_correction(
        &mut self,
        has_changes: bool,
        replayed: bool,
        created: bool,
        enrichment_degraded: bool,
    ) {
        let learning = &mut self.learning;
        if !has_changes {
            learning.unchanged += 1;
            return;
        }
        if replayed {
            learning.replayed += 1;
            return;
        }
        learning.corrections += 1;
        learning.categories_created += u64::from(created);
        learning.enrichment_fallbacks += u64::from(enrichment_degraded);
    }

    /// Reset all counters (for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
