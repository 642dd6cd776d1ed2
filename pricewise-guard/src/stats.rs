//! Order statistics for historical totals.
//!
//! Percentiles use the simple nearest-rank definition:
//! rank = ⌈p/100 × n⌉, value = sorted[rank − 1]. No interpolation.

/// Keep only totals that can be real prices (finite, strictly positive), sorted ascending.
pub fn clean_history(history: &[f64]) -> Vec<f64> {
    let mut totals: Vec<f64> = history
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t > 0.0)
        .collect();
    totals.sort_by(|a, b| a.total_cmp(b));
    totals
}

/// Nearest-rank percentile of an ascending slice. `percent` is clamped to 1..=100.
///
/// Integer arithmetic keeps ranks exact (P95 of 20 samples is rank 19).
pub fn nearest_rank(sorted: &[f64], percent: u32) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let p = percent.clamp(1, 100) as usize;
    let rank = (p * n).div_ceil(100).max(1);
    sorted.get(rank - 1).copied()
}

/// Median as the nearest-rank 50th percentile.
pub fn median(sorted: &[f64]) -> Option<f64> {
    nearest_rank(sorted, 50)
}
