/// Accuracy confidence: `1 / (1 + avg_abs_change_percent / scale)`.
///
/// Small historical edits push it toward 1.0; an average edit of `scale`
/// percent gives 0.5. A category with no corrections yet is neutral (0.5).
pub fn calculate(correction_count: u32, avg_abs_change_percent: f64, scale_percent: f64) -> f64 {
    if correction_count == 0 || scale_percent <= 0.0 {
        return 0.5;
    }
    let avg = if avg_abs_change_percent.is_finite() {
        avg_abs_change_percent.abs()
    } else {
        return 0.0;
    };
    (1.0 / (1.0 + avg / scale_percent)).clamp(0.0, 1.0)
}
