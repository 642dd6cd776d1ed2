//! [`ObservabilityEngine`]: owns the counters and the degradation log.

use pricewise_core::errors::PricingError;
use pricewise_core::models::DegradationEvent;

use crate::degradation::{ComponentHealth, DegradationLog};
use crate::metrics::MetricsCollector;

#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    pub metrics: MetricsCollector,
    pub degradation: DegradationLog,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_degradation(&mut self, event: DegradationEvent) {
        self.degradation.record(event);
    }

    pub fn mark_recovered(&mut self, component: &str) -> bool {
        self.degradation.mark_recovered(component)
    }

    /// Components currently on a fallback.
    pub fn degraded_components(&self) -> Vec<ComponentHealth> {
        self.degradation.degraded().cloned().collect()
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Counters plus per-component degradation state as JSON.
    ///
    /// `degradations` is keyed by component and includes recovered ones.
    pub fn metrics_snapshot(&self) -> Result<serde_json::Value, PricingError> {
        let metrics = serde_json::to_value(&self.metrics)?;
        let mut degradations = serde_json::Map::new();
        for health in self.degradation.components() {
            degradations.insert(health.component.clone(), serde_json::to_value(health)?);
        }
        Ok(serde_json::json!({
            "metrics": metrics,
            "degradations": degradations,
        }))
    }
}
