/// Pricewise system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current schema version of a persisted `PricingKnowledge` record.
pub const KNOWLEDGE_SCHEMA_VERSION: u32 = 1;

/// Confidence never reaches certainty.
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// Maximum number of save retries after an optimistic-concurrency conflict.
pub const MAX_SAVE_ATTEMPTS: usize = 3;

/// Cents precision used when rounding money amounts.
pub const MONEY_SCALE: f64 = 100.0;

/// Round a money amount to cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * MONEY_SCALE).round() / MONEY_SCALE
}
