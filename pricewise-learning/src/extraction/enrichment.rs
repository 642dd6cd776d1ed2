//! Optional analyzer call, bounded by a timeout.
//!
//! The analyzer runs on its own thread and answers through a bounded
//! channel. Timeout, malformed output or an empty answer all degrade to
//! rule-based extraction; the numeric update never waits on this.
//!
//! A timed-out call keeps its thread until the analyzer returns. At most
//! `max_in_flight` such threads exist per engine; further calls skip the
//! analyzer and degrade straight away.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use serde::{Deserialize, Serialize};

use pricewise_core::models::{CorrectionRecord, DegradationEvent};
use pricewise_core::traits::{AnalyzerOutcome, ICorrectionAnalyzer};

use super::rule_based::extract_adjustments;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentSource {
    Analyzer,
    RuleBased,
}

/// Adjustment statements proposed for one correction.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub adjustments: Vec<String>,
    pub tailored_prompt: Option<String>,
    pub source: EnrichmentSource,
    /// Set when the analyzer was configured but could not be used.
    pub degradation: Option<DegradationEvent>,
}

impl Enrichment {
    fn rule_based(notes: Option<&str>, degradation: Option<DegradationEvent>) -> Self {
        Self {
            adjustments: notes.map(extract_adjustments).unwrap_or_default(),
            tailored_prompt: None,
            source: EnrichmentSource::RuleBased,
            degradation,
        }
    }
}

/// Counts analyzer threads that have not returned yet.
#[derive(Debug, Clone)]
pub struct AnalyzerSlots {
    in_flight: Arc<AtomicUsize>,
    max: usize,
}

/// One occupied slot; released when the analyzer thread finishes.
#[derive(Debug)]
pub struct SlotGuard(Arc<AtomicUsize>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl AnalyzerSlots {
    pub fn new(max: usize) -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            max,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn try_acquire(&self) -> Option<SlotGuard> {
        self.in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max).then_some(n + 1)
            })
            .ok()
            .map(|_| SlotGuard(Arc::clone(&self.in_flight)))
    }
}

/// Ask the analyzer (if any) for adjustment statements.
pub fn enrich(
    analyzer: Option<&Arc<dyn ICorrectionAnalyzer>>,
    slots: &AnalyzerSlots,
    record: &CorrectionRecord,
    notes: Option<&str>,
    timeout: Duration,
) -> Enrichment {
    let Some(analyzer) = analyzer else {
        return Enrichment::rule_based(notes, None);
    };
    let Some(slot) = slots.try_acquire() else {
        let failure = format!("{} analyzer calls still running", slots.in_flight());
        return Enrichment::rule_based(notes, Some(degraded(failure)));
    };

    match run_with_timeout(Arc::clone(analyzer), slot, record, notes, timeout) {
        Ok(AnalyzerOutcome::Success {
            adjustments,
            tailored_prompt,
        }) => {
            if adjustments.is_empty() {
                let mut fallback = Enrichment::rule_based(notes, None);
                fallback.tailored_prompt = tailored_prompt;
                fallback
            } else {
                Enrichment {
                    adjustments,
                    tailored_prompt,
                    source: EnrichmentSource::Analyzer,
                    degradation: None,
                }
            }
        }
        Ok(AnalyzerOutcome::Empty) => {
            tracing::debug!("analyzer returned nothing, using note extraction");
            Enrichment::rule_based(notes, None)
        }
        Ok(AnalyzerOutcome::Malformed { reason }) => {
            let event = degraded(format!("malformed analyzer output: {reason}"));
            Enrichment::rule_based(notes, Some(event))
        }
        Err(failure) => Enrichment::rule_based(notes, Some(degraded(failure))),
    }
}

fn degraded(failure: String) -> DegradationEvent {
    let event = DegradationEvent::now("correction_analyzer", failure, "rule_based_extraction");
    tracing::warn!(
        component = %event.component,
        failure = %event.failure,
        fallback = %event.fallback_used,
        "enrichment degraded"
    );
    event
}

fn run_with_timeout(
    analyzer: Arc<dyn ICorrectionAnalyzer>,
    slot: SlotGuard,
    record: &CorrectionRecord,
    notes: Option<&str>,
    timeout: Duration,
) -> Result<AnalyzerOutcome, String> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let record = record.clone();
    let notes = notes.map(String::from);

    std::thread::Builder::new()
        .name("pricewise-enrichment".to_string())
        .spawn(move || {
            let _slot = slot;
            let outcome = analyzer.analyze(&record, notes.as_deref());
            // The receiver may have given up already.
            let _ = tx.send(outcome);
        })
        .map_err(|e| format!("could not start analyzer thread: {e}"))?;

    match rx.recv_timeout(timeout) {
        Ok(outcome) => Ok(outcome),
        Err(RecvTimeoutError::Timeout) => {
            Err(format!("analyzer did not answer within {}ms", timeout.as_millis()))
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err("analyzer thread exited without answering".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricewise_core::models::QuoteSnapshot;

    struct Fixed(AnalyzerOutcome);
    impl ICorrectionAnalyzer for Fixed {
        fn analyze(&self, _: &CorrectionRecord, _: Option<&str>) -> AnalyzerOutcome {
            self.0.clone()
        }
    }

    struct Slow;
    impl ICorrectionAnalyzer for Slow {
        fn analyze(&self, _: &CorrectionRecord, _: Option<&str>) -> AnalyzerOutcome {
            std::thread::sleep(Duration::from_millis(500));
            AnalyzerOutcome::Empty
        }
    }

    struct Panics;
    impl ICorrectionAnalyzer for Panics {
        fn analyze(&self, _: &CorrectionRecord, _: Option<&str>) -> AnalyzerOutcome {
            panic!("analyzer crashed")
        }
    }

    fn record() -> CorrectionRecord {
        crate::diff::diff_quotes(
            &QuoteSnapshot::new(vec![], 100.0),
            &QuoteSnapshot::new(vec![], 120.0),
            None,
        )
    }

    const NOTES: Option<&str> = Some("Add 20% for rush jobs.");

    fn enrich_with(
        analyzer: Option<&Arc<dyn ICorrectionAnalyzer>>,
        timeout: Duration,
    ) -> Enrichment {
        enrich(analyzer, &AnalyzerSlots::new(4), &record(), NOTES, timeout)
    }

    #[test]
    fn no_analyzer_uses_notes_without_degradation() {
        let e = enrich_with(None, Duration::from_millis(50));
        assert_eq!(e.source, EnrichmentSource::RuleBased);
        assert_eq!(e.adjustments, vec!["Add 20% for rush jobs"]);
        assert!(e.degradation.is_none());
    }

    #[test]
    fn analyzer_success_wins() {
        let analyzer: Arc<dyn ICorrectionAnalyzer> = Arc::new(Fixed(AnalyzerOutcome::Success {
            adjustments: vec!["Add 10% for clay soil".to_string()],
            tailored_prompt: Some("Ask about soil".to_string()),
        }));
        let e = enrich_with(Some(&analyzer), Duration::from_secs(2));
        assert_eq!(e.source, EnrichmentSource::Analyzer);
        assert_eq!(e.adjustments, vec!["Add 10% for clay soil"]);
        assert_eq!(e.tailored_prompt.as_deref(), Some("Ask about soil"));
    }

    #[test]
    fn malformed_output_degrades() {
        let analyzer: Arc<dyn ICorrectionAnalyzer> = Arc::new(Fixed(AnalyzerOutcome::Malformed {
            reason: "not json".to_string(),
        }));
        let e = enrich_with(Some(&analyzer), Duration::from_secs(2));
        assert_eq!(e.source, EnrichmentSource::RuleBased);
        assert_eq!(e.adjustments, vec!["Add 20% for rush jobs"]);
        assert!(e.degradation.is_some());
    }

    #[test]
    fn timeout_degrades_without_waiting() {
        let analyzer: Arc<dyn ICorrectionAnalyzer> = Arc::new(Slow);
        let started = std::time::Instant::now();
        let e = enrich_with(Some(&analyzer), Duration::from_millis(20));
        assert!(started.elapsed() < Duration::from_millis(400));
        let event = e.degradation.expect("timeout is a degradation");
        assert!(event.failure.contains("20ms"));
    }

    #[test]
    fn panicking_analyzer_degrades() {
        let analyzer: Arc<dyn ICorrectionAnalyzer> = Arc::new(Panics);
        let e = enrich_with(Some(&analyzer), Duration::from_secs(2));
        assert!(e.degradation.is_some());
        assert_eq!(e.adjustments, vec!["Add 20% for rush jobs"]);
    }

    #[test]
    fn saturated_slots_skip_the_analyzer() {
        let analyzer: Arc<dyn ICorrectionAnalyzer> = Arc::new(Slow);
        let slots = AnalyzerSlots::new(1);

        let timeout = Duration::from_millis(10);
        let first = enrich(Some(&analyzer), &slots, &record(), NOTES, timeout);
        assert!(first.degradation.is_some());
        assert_eq!(slots.in_flight(), 1);

        let started = std::time::Instant::now();
        let timeout = Duration::from_secs(2);
        let second = enrich(Some(&analyzer), &slots, &record(), NOTES, timeout);
        assert!(started.elapsed() < Duration::from_millis(400));
        let event = second.degradation.expect("saturation is a degradation");
        assert!(event.failure.contains("still running"));
        assert_eq!(second.adjustments, vec!["Add 20% for rush jobs"]);
    }

    #[test]
    fn slot_is_released_when_the_analyzer_returns() {
        let slots = AnalyzerSlots::new(1);
        let guard = slots.try_acquire().expect("free slot");
        assert!(slots.try_acquire().is_none());
        drop(guard);
        assert_eq!(slots.in_flight(), 0);
        assert!(slots.try_acquire().is_some());
    }
}
