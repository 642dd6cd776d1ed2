use chrono::{DateTime, Utc};

/// Recency confidence: `e^(-days_since_update / decay_days)`.
///
/// Entries that never observed a total have no recency (0.0).
pub fn calculate(
    sample_count: u32,
    updated_at: DateTime<Utc>,
    now: DateTime<Utc>,
    decay_days: f64,
) -> f64 {
    if sample_count == 0 || decay_days <= 0.0 {
        return 0.0;
    }
    let days = (now - updated_at).num_seconds().max(0) as f64 / 86400.0;
    (-days / decay_days).exp().clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn fresh_is_one_and_decays() {
        let now = Utc::now();
        assert_eq!(calculate(1, now, now, 90.0), 1.0);
        let r = calculate(1, now - Duration::days(90), now, 90.0);
        assert!((r - (-1.0f64).exp()).abs() < 1e-9);
        assert_eq!(calculate(0, now, now, 90.0), 0.0);
    }

    #[test]
    fn future_timestamps_count_as_fresh() {
        let now = Utc::now();
        assert_eq!(calculate(2, now + Duration::days(3), now, 90.0), 1.0);
    }
}
