/// Data confidence: `1 - e^(-samples / saturation)`.
///
/// 0 samples → 0.0; 8 samples → ~0.63 with the default saturation.
pub fn calculate(sample_count: u32, saturation: f64) -> f64 {
    if sample_count == 0 || saturation <= 0.0 {
        return 0.0;
    }
    (1.0 - (-(sample_count as f64) / saturation).exp()).clamp(0.0, 1.0)
}
