//! Error handling for Pricewise.
//! One error enum per subsystem, `thiserror` only, aggregated into [`PricingError`].

pub mod config_error;
pub mod pricing_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use pricing_error::{PricingError, PricingResult};
pub use storage_error::StorageError;
