//! Per-component degradation state.
//!
//! Components are the two things the pricing memory can lose: the knowledge
//! store (read paths fall back to global bounds or low confidence) and the
//! correction analyzer (learning falls back to note extraction). Each keeps
//! running counts and its latest few events.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use pricewise_core::models::DegradationEvent;
use serde::Serialize;

use crate::tracing_setup::events;

/// Latest events kept per component; older ones only survive in the counts.
pub const RECENT_PER_COMPONENT: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub component: String,
    /// Every degradation ever recorded for the component.
    pub total: u64,
    /// Degradations since the component last recovered.
    pub open: u64,
    /// Timestamp of the first open degradation.
    pub degraded_since: Option<DateTime<Utc>>,
    pub last_recovered_at: Option<DateTime<Utc>>,
    pub recent: VecDeque<DegradationEvent>,
}

impl ComponentHealth {
    fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            total: 0,
            open: 0,
            degraded_since: None,
            last_recovered_at: None,
            recent: VecDeque::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.open > 0
    }

    /// Fallback used by the most recent event.
    pub fn current_fallback(&self) -> Option<&str> {
        self.recent.back().map(|e| e.fallback_used.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DegradationLog {
    components: BTreeMap<String, ComponentHealth>,
}

impl DegradationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and log it at `warn`.
    pub fn record(&mut self, event: DegradationEvent) {
        events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);

        let health = self
            .components
            .entry(event.component.clone())
            .or_insert_with(|| ComponentHealth::new(&event.component));
        health.total += 1;
        health.open += 1;
        health.degraded_since.get_or_insert(event.timestamp);
        health.recent.push_back(event);
        if health.recent.len() > RECENT_PER_COMPONENT {
            health.recent.pop_front();
        }
    }

    /// Close the component's open degradations. Returns whether any were open.
    pub fn mark_recovered(&mut self, component: &str) -> bool {
        let Some(health) = self.components.get_mut(component) else {
            return false;
        };
        if !health.is_degraded() {
            return false;
        }
        let since = health.degraded_since.take();
        health.open = 0;
        health.last_recovered_at = Some(Utc::now());
        tracing::info!(component, degraded_since = ?since, "component recovered");
        true
    }

    pub fn component(&self, component: &str) -> Option<&ComponentHealth> {
        self.components.get(component)
    }

    /// Components currently running on a fallback, by name.
    pub fn degraded(&self) -> impl Iterator<Item = &ComponentHealth> {
        self.components.values().filter(|h| h.is_degraded())
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentHealth> {
        self.components.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer_timeout() -> DegradationEvent {
        DegradationEvent::now("correction_analyzer", "timeout", "rule_based_extraction")
    }

    #[test]
    fn counts_open_events_until_recovery() {
        let mut log = DegradationLog::new();
        log.record(analyzer_timeout());
        log.record(analyzer_timeout());
        log.record(DegradationEvent::now("storage", "database is locked", "global_bounds"));

        let analyzer = log.component("correction_analyzer").unwrap();
        assert_eq!((analyzer.total, analyzer.open), (2, 2));
        assert_eq!(analyzer.current_fallback(), Some("rule_based_extraction"));
        assert_eq!(log.degraded().count(), 2);

        assert!(log.mark_recovered("correction_analyzer"));
        assert!(!log.mark_recovered("correction_analyzer"));
        let analyzer = log.component("correction_analyzer").unwrap();
        assert_eq!((analyzer.total, analyzer.open), (2, 0));
        assert!(analyzer.degraded_since.is_none());
        assert!(analyzer.last_recovered_at.is_some());
        let degraded: Vec<&str> = log.degraded().map(|h| h.component.as_str()).collect();
        assert_eq!(degraded, ["storage"]);
    }

    #[test]
    fn degraded_since_is_the_first_open_event() {
        let mut log = DegradationLog::new();
        let mut first = analyzer_timeout();
        first.timestamp = Utc::now() - chrono::Duration::minutes(5);
        let first_at = first.timestamp;
        log.record(first);
        log.record(analyzer_timeout());
        let analyzer = log.component("correction_analyzer").unwrap();
        assert_eq!(analyzer.degraded_since, Some(first_at));
    }

    #[test]
    fn recent_events_are_bounded_but_totals_are_not() {
        let mut log = DegradationLog::new();
        for _ in 0..RECENT_PER_COMPONENT + 5 {
            log.record(DegradationEvent::now("storage", "io", "global_bounds"));
        }
        let storage = log.component("storage").unwrap();
        assert_eq!(storage.recent.len(), RECENT_PER_COMPONENT);
        assert_eq!(storage.total, (RECENT_PER_COMPONENT + 5) as u64);
    }

    #[test]
    fn recovering_an_unknown_component_is_a_no_op() {
        let mut log = DegradationLog::new();
        assert!(!log.mark_recovered("storage"));
        assert_eq!(log.components().count(), 0);
    }
}
