//! Bounds computation: category statistics or the global fallback envelope.

use pricewise_core::config::GuardConfig;
use pricewise_core::models::{BoundsSource, HistoricalBounds};

use crate::stats::{clean_history, median, nearest_rank};

/// Compute warning/block thresholds from raw historical totals.
///
/// Fewer than `config.min_samples` usable totals selects the global envelope.
/// The warning threshold never exceeds the block threshold on either path.
pub fn compute_bounds(history: &[f64], config: &GuardConfig) -> HistoricalBounds {
    let sorted = clean_history(history);
    if sorted.len() < config.min_samples.max(1) {
        return global_bounds(sorted.len(), config);
    }

    let (Some(median), Some(p95), Some(&lowest)) =
        (median(&sorted), nearest_rank(&sorted, 95), sorted.first())
    else {
        return global_bounds(sorted.len(), config);
    };

    let block_threshold = p95 * config.block_multiplier;
    let warning_threshold = (p95 * config.warning_multiplier).min(block_threshold);

    HistoricalBounds {
        median,
        p95,
        lower_bound: lowest,
        warning_threshold,
        block_threshold,
        sample_size: sorted.len(),
        source: BoundsSource::Category,
    }
}

/// The fixed envelope used when a category has too little history.
pub fn global_bounds(sample_size: usize, config: &GuardConfig) -> HistoricalBounds {
    let block_threshold = config.global_max_total;
    let warning_threshold =
        (config.global_max_total * config.global_warning_ratio).min(block_threshold);
    HistoricalBounds {
        median: 0.0,
        p95: 0.0,
        lower_bound: config.global_min_total,
        warning_threshold,
        block_threshold,
        sample_size,
        source: BoundsSource::GlobalFallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_samples_fall_back() {
        let b = compute_bounds(&[1000.0, 2000.0, 3000.0, 4000.0], &GuardConfig::default());
        assert_eq!(b.source, BoundsSource::GlobalFallback);
        assert_eq!(b.sample_size, 4);
        assert_eq!(b.lower_bound, 100.0);
        assert_eq!(b.warning_threshold, 250_000.0);
        assert_eq!(b.block_threshold, 500_000.0);
    }

    #[test]
    fn five_samples_use_category_stats() {
        let b = compute_bounds(&[5000.0, 1000.0, 3000.0, 2000.0, 4000.0], &GuardConfig::default());
        assert_eq!(b.source, BoundsSource::Category);
        assert_eq!(b.median, 3000.0);
        assert_eq!(b.p95, 5000.0);
        assert_eq!(b.lower_bound, 1000.0);
        assert_eq!(b.warning_threshold, 15_000.0);
        assert_eq!(b.block_threshold, 50_000.0);
    }

    #[test]
    fn unusable_totals_do_not_count_as_samples() {
        let history = [1000.0, 2000.0, 3000.0, 4000.0, f64::NAN, -1.0];
        let b = compute_bounds(&history, &GuardConfig::default());
        assert_eq!(b.source, BoundsSource::GlobalFallback);
    }

    #[test]
    fn misconfigured_multipliers_still_keep_warning_below_block() {
        let config = GuardConfig {
            warning_multiplier: 20.0,
            block_multiplier: 10.0,
            ..GuardConfig::default()
        };
        let b = compute_bounds(&[100.0; 6], &config);
        assert!(b.warning_threshold <= b.block_threshold);
    }
}
