//! Span definitions per operation: sanity, learning, explain, confidence.

/// Create a sanity-check span.
#[macro_export]
macro_rules! sanity_span {
    ($contractor_id:expr, $category:expr) => {
        $crate::tracing::info_span!(
            "pricewise.sanity",
            contractor_id = %$contractor_id,
            category = %$category
        )
    };
}

/// Create a correction-learning span.
#[macro_export]
macro_rules! learning_span {
    ($contractor_id:expr, $category:expr) => {
        $crate::tracing::info_span!(
            "pricewise.learning",
            contractor_id = %$contractor_id,
            category = %$category
        )
    };
}

/// Create an explanation span.
#[macro_export]
macro_rules! explain_span {
    ($contractor_id:expr, $category:expr) => {
        $crate::tracing::info_span!(
            "pricewise.explain",
            contractor_id = %$contractor_id,
            category = %$category
        )
    };
}

/// Create a confidence-read span.
#[macro_export]
macro_rules! confidence_span {
    ($contractor_id:expr, $category:expr) => {
        $crate::tracing::info_span!(
            "pricewise.confidence",
            contractor_id = %$contractor_id,
            category = %$category
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SANITY: &str = "pricewise.sanity";
    pub const LEARNING: &str = "pricewise.learning";
    pub const EXPLAIN: &str = "pricewise.explain";
    pub const CONFIDENCE: &str = "pricewise.confidence";
}
