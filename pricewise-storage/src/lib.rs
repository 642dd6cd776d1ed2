//! # pricewise-storage
//!
//! Implementations of the `IKnowledgeStore` persistence collaborator:
//! an in-memory store for tests and embedding, and a SQLite store with
//! schema migrations and version-checked saves.

pub mod connection;
pub mod engine;
pub mod memory;
pub mod migrations;
pub mod queries;

pub use engine::StorageEngine;
pub use memory::InMemoryKnowledgeStore;

use pricewise_core::errors::{PricingError, StorageError};

/// Convert a SQLite failure message into a `PricingError`.
pub(crate) fn to_storage_err(message: String) -> PricingError {
    PricingError::Storage(StorageError::SqliteError { message })
}

/// Reject totals that can never be real prices.
pub(crate) fn validate_total(total: f64) -> Result<(), PricingError> {
    if total.is_finite() && total >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::Validation {
            field: "historical_total".to_string(),
            reason: format!("{total} is not a finite non-negative amount"),
        })
    }
}
