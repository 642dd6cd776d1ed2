//! Configuration for Pricewise.
//! TOML-based; every section falls back to compiled defaults.

pub mod confidence_config;
pub mod defaults;
pub mod enrichment_config;
pub mod explain_config;
pub mod guard_config;
pub mod learning_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use confidence_config::ConfidenceConfig;
pub use enrichment_config::EnrichmentConfig;
pub use explain_config::ExplainConfig;
pub use guard_config::GuardConfig;
pub use learning_config::LearningConfig;

use crate::constants::CONFIDENCE_CEILING;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PricewiseConfig {
    pub learning: LearningConfig,
    pub confidence: ConfidenceConfig,
    pub guard: GuardConfig,
    pub explain: ExplainConfig,
    pub enrichment: EnrichmentConfig,
}

impl PricewiseConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ceiling = self.confidence.ceiling;
        if !(ceiling > 0.0 && ceiling <= CONFIDENCE_CEILING) {
            return Err(invalid("confidence.ceiling", "must be in (0.0, 0.95]"));
        }
        if (self.confidence.weight_sum() - 1.0).abs() > 1e-6 {
            return Err(invalid(
                "confidence.weight_*",
                "data, accuracy and recency weights must sum to 1.0",
            ));
        }
        let labels = &self.confidence;
        if !(labels.label_learning_at <= labels.label_good_at
            && labels.label_good_at <= labels.label_high_at)
        {
            return Err(invalid(
                "confidence.label_*",
                "label thresholds must be non-decreasing",
            ));
        }
        if !(0.0..=1.0).contains(&self.learning.blend_weight_old) {
            return Err(invalid("learning.blend_weight_old", "must be between 0.0 and 1.0"));
        }
        if self.learning.confidence_step < 0.0 {
            return Err(invalid("learning.confidence_step", "must not be negative"));
        }
        if !(0.0..=ceiling).contains(&self.learning.initial_confidence) {
            return Err(invalid(
                "learning.initial_confidence",
                "must be between 0.0 and the confidence ceiling",
            ));
        }
        if !(0.0..=ceiling).contains(&self.learning.inherited_confidence_cap) {
            return Err(invalid(
                "learning.inherited_confidence_cap",
                "must be between 0.0 and the confidence ceiling",
            ));
        }
        let guard = &self.guard;
        if guard.warning_multiplier <= 0.0 || guard.warning_multiplier > guard.block_multiplier {
            return Err(invalid(
                "guard.warning_multiplier",
                "must be positive and not exceed guard.block_multiplier",
            ));
        }
        if !(0.0..=1.0).contains(&guard.global_warning_ratio) {
            return Err(invalid("guard.global_warning_ratio", "must be between 0.0 and 1.0"));
        }
        if guard.global_min_total < 0.0 || guard.global_min_total > guard.global_max_total {
            return Err(invalid(
                "guard.global_min_total",
                "must be non-negative and not exceed guard.global_max_total",
            ));
        }
        if !(0.0..1.0).contains(&self.explain.dna_discount) {
            return Err(invalid("explain.dna_discount", "must be in [0.0, 1.0)"));
        }
        if self.enrichment.timeout_ms == 0 {
            return Err(invalid("enrichment.timeout_ms", "must be greater than 0"));
        }
        if self.enrichment.max_in_flight == 0 {
            return Err(invalid("enrichment.max_in_flight", "must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
