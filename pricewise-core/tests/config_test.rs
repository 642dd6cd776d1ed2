use pricewise_core::config::{defaults, PricewiseConfig};
use pricewise_core::errors::ConfigError;

#[test]
fn defaults_are_valid() {
    let config = PricewiseConfig::default();
    config.validate().expect("default config must validate");
    assert_eq!(config.learning.blend_weight_old, 0.7);
    assert_eq!(config.learning.confidence_step, 0.02);
    assert_eq!(config.guard.min_samples, 5);
    assert_eq!(config.guard.warning_multiplier, 3.0);
    assert_eq!(config.guard.block_multiplier, 10.0);
    assert_eq!(config.confidence.ceiling, 0.95);
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = PricewiseConfig::from_toml(
        r#"
        [guard]
        min_samples = 8

        [enrichment]
        timeout_ms = 500
        "#,
    )
    .unwrap();
    assert_eq!(config.guard.min_samples, 8);
    assert_eq!(config.enrichment.timeout_ms, 500);
    assert_eq!(config.guard.block_multiplier, defaults::DEFAULT_BLOCK_MULTIPLIER);
    assert_eq!(config.explain.dna_discount, defaults::DEFAULT_DNA_DISCOUNT);
}

#[test]
fn empty_toml_is_default() {
    let config = PricewiseConfig::from_toml("").unwrap();
    assert_eq!(config.guard.global_max_total, 500_000.0);
}

#[test]
fn rejects_warning_above_block() {
    let err = PricewiseConfig::from_toml(
        r#"
        [guard]
        warning_multiplier = 12.0
        block_multiplier = 10.0
        "#,
    )
    .unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "guard.warning_multiplier")
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn rejects_weights_not_summing_to_one() {
    let err = PricewiseConfig::from_toml(
        r#"
        [confidence]
        weight_data = 0.9
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn rejects_ceiling_above_one() {
    let err = PricewiseConfig::from_toml(
        r#"
        [confidence]
        ceiling = 1.5
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("confidence.ceiling"));
}

#[test]
fn rejects_ceiling_above_stored_cap() {
    let err = PricewiseConfig::from_toml(
        r#"
        [confidence]
        ceiling = 0.99
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("confidence.ceiling"));

    let lower = PricewiseConfig::from_toml(
        r#"
        [confidence]
        ceiling = 0.9
        "#,
    );
    assert!(lower.is_ok());
}

#[test]
fn invalid_toml_is_parse_error() {
    let err = PricewiseConfig::from_toml("[guard\nmin_samples = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}
