//! SanityGuard: the entry point used by the quote flow.

use pricewise_core::config::GuardConfig;
use pricewise_core::errors::PricingError;
use pricewise_core::knowledge::CategoryKey;
use pricewise_core::models::{HistoricalBounds, SanityAction, SanityVerdict};
use pricewise_core::traits::IKnowledgeStore;

use crate::bounds::{compute_bounds, global_bounds};
use crate::verdict::verdict;

/// Verdict from a store-backed check.
#[derive(Debug)]
pub struct StoreCheck {
    pub verdict: SanityVerdict,
    /// Set when history could not be read and the global envelope was used.
    pub read_error: Option<PricingError>,
}

impl StoreCheck {
    pub fn degraded(&self) -> bool {
        self.read_error.is_some()
    }
}

/// Validates candidate totals. Read-only; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct SanityGuard {
    config: GuardConfig,
}

impl SanityGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Bounds for a set of historical totals.
    pub fn bounds(&self, history: &[f64]) -> HistoricalBounds {
        compute_bounds(history, &self.config)
    }

    /// Check a candidate against already-loaded history.
    pub fn check(&self, key: &CategoryKey, amount: f64, history: &[f64]) -> SanityVerdict {
        let bounds = self.bounds(history);
        let result = verdict(amount, &key.category, bounds);
        log_verdict(key, &result);
        result
    }

    /// Check a candidate, reading history from the store.
    ///
    /// A failed read degrades to the global envelope and never raises; the
    /// error is handed back so the caller can record the degradation.
    pub fn check_with_store(
        &self,
        store: &dyn IKnowledgeStore,
        key: &CategoryKey,
        amount: f64,
    ) -> StoreCheck {
        match store.get_historical_totals(key) {
            Ok(history) => StoreCheck {
                verdict: self.check(key, amount, &history),
                read_error: None,
            },
            Err(e) => {
                tracing::debug!(
                    contractor_id = %key.contractor_id,
                    category = %key.category,
                    "history unavailable, using global bounds"
                );
                let result = verdict(amount, &key.category, global_bounds(0, &self.config));
                log_verdict(key, &result);
                StoreCheck {
                    verdict: result,
                    read_error: Some(e),
                }
            }
        }
    }
}

fn log_verdict(key: &CategoryKey, v: &SanityVerdict) {
    let b = &v.bounds;
    match v.action {
        SanityAction::Pass => tracing::debug!(
            contractor_id = %key.contractor_id,
            category = %key.category,
            amount = v.amount,
            "sanity pass"
        ),
        SanityAction::Warn | SanityAction::Block => tracing::warn!(
            contractor_id = %key.contractor_id,
            category = %key.category,
            action = v.action.as_str(),
            amount = v.amount,
            median = b.median,
            p95 = b.p95,
            warning_threshold = b.warning_threshold,
            block_threshold = b.block_threshold,
            sample_size = b.sample_size,
            "sanity verdict"
        ),
    }
}
