//! # pricewise-runtime
//!
//! [`PricingRuntime`] owns every engine and exposes the four collaborator
//! operations (sanity check, correction processing, category confidence,
//! quote explanation) plus onboarding and removal of categories.

pub mod options;
pub mod runtime;

pub use options::RuntimeOptions;
pub use runtime::PricingRuntime;
