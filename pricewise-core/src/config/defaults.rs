// Single source of truth for all default values.

// --- Learning ---
pub const DEFAULT_BLEND_WEIGHT_OLD: f64 = 0.7;
pub const DEFAULT_CONFIDENCE_STEP: f64 = 0.02;
pub const DEFAULT_INITIAL_CONFIDENCE: f64 = 0.3;
pub const DEFAULT_MAX_APPLIED_FINGERPRINTS: usize = 256;

// --- Confidence ---
pub const DEFAULT_CONFIDENCE_CEILING: f64 = 0.95;
pub const DEFAULT_DATA_SATURATION: f64 = 8.0;
pub const DEFAULT_ACCURACY_SCALE_PERCENT: f64 = 20.0;
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 90.0;
pub const DEFAULT_WEIGHT_DATA: f64 = 0.40;
pub const DEFAULT_WEIGHT_ACCURACY: f64 = 0.35;
pub const DEFAULT_WEIGHT_RECENCY: f64 = 0.25;
pub const DEFAULT_LABEL_LEARNING_AT: u32 = 2;
pub const DEFAULT_LABEL_GOOD_AT: u32 = 5;
pub const DEFAULT_LABEL_HIGH_AT: u32 = 10;

// --- Guard ---
pub const DEFAULT_MIN_HISTORY_SAMPLES: usize = 5;
pub const DEFAULT_GLOBAL_MIN_TOTAL: f64 = 100.0;
pub const DEFAULT_GLOBAL_MAX_TOTAL: f64 = 500_000.0;
pub const DEFAULT_GLOBAL_WARNING_RATIO: f64 = 0.5;
pub const DEFAULT_WARNING_MULTIPLIER: f64 = 3.0;
pub const DEFAULT_BLOCK_MULTIPLIER: f64 = 10.0;

// --- Explain ---
pub const DEFAULT_TRUSTED_PATTERN_THRESHOLD: u32 = 5;
pub const DEFAULT_DNA_CONFIDENCE: f64 = 0.50;
pub const DEFAULT_DNA_DISCOUNT: f64 = 0.125;
pub const DEFAULT_FALLBACK_CONFIDENCE: f64 = 0.30;
pub const DEFAULT_SPARSE_SAMPLE_THRESHOLD: u32 = 3;
pub const DEFAULT_LARGE_CORRECTION_PERCENT: f64 = 15.0;
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 180;
pub const DEFAULT_LARGE_PROJECT_RATIO: f64 = 3.0;
pub const DEFAULT_LARGE_PROJECT_ABSOLUTE: f64 = 100_000.0;

// --- Enrichment ---
pub const DEFAULT_ENRICHMENT_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_MAX_ANALYZER_IN_FLIGHT: usize = 4;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "pricewise=info";
