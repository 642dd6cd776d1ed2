use super::{ConfigError, StorageError};

/// Top-level error for every Pricewise operation.
///
/// Only `Storage`, `Serialization` and `Config` are hard failures. The other
/// variants describe conditions the quote flow is expected to handle:
/// a skipped field, a default-bounds read, a re-input request, or a
/// numeric-only update.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("invalid correction field {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no pricing knowledge for contractor {contractor_id}, category {category}")]
    NotFound {
        contractor_id: String,
        category: String,
    },

    #[error(
        "quote total {amount:.2} exceeds block threshold {block_threshold:.2}; re-input required"
    )]
    BlockedPricing { amount: f64, block_threshold: f64 },

    #[error("correction analyzer did not answer within {timeout_ms}ms")]
    EnrichmentTimeout { timeout_ms: u64 },

    #[error("concurrent modification of {key}: expected version {expected}, found {actual}")]
    ConcurrentModification {
        key: String,
        expected: u64,
        actual: u64,
    },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PricingError {
    /// Whether the caller can recover by retrying or asking the user again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::BlockedPricing { .. }
                | Self::EnrichmentTimeout { .. }
                | Self::ConcurrentModification { .. }
        )
    }

    /// Stable machine-readable code for UI and log consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::BlockedPricing { .. } => "BLOCKED_PRICING",
            Self::EnrichmentTimeout { .. } => "ENRICHMENT_TIMEOUT",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Convenience alias used across the workspace.
pub type PricingResult<T> = Result<T, PricingError>;
