//! Tests for [`EngineConfig`].

use rstest::rstest;

use crate::{Category, ConfigError, DEFAULT_MAX_QUERY_DEPTH, EngineConfig, RuleOverride, Severity};

#[test]
fn default_config_enables_everything() {
    let config = EngineConfig::default();
    assert!(config.is_enabled("any-rule", Category::CodeQuality));
    assert_eq!(config.max_query_depth(), DEFAULT_MAX_QUERY_DEPTH);
    assert_eq!(
        config.severity_for("any-rule", Category::CodeQuality, Severity::Warning),
        Severity::Warning
    );
}

#[test]
fn rule_override_wins_over_category() {
    let config = EngineConfig::default()
        .with_category(Category::CodeQuality, RuleOverride::disabled())
        .with_rule(
            "base-call-with-implicit-defaults",
            RuleOverride::with_severity(Severity::Error),
        );

    assert!(!config.is_enabled("optional-parameter-mismatch", Category::CodeQuality));
    // The rule entry sets only a severity, so `enabled` falls through.
    assert!(!config.is_enabled("base-call-with-implicit-defaults", Category::CodeQuality));
    assert_eq!(
        config.severity_for(
            "base-call-with-implicit-defaults",
            Category::CodeQuality,
            Severity::Warning
        ),
        Severity::Error
    );
}

#[test]
fn json_configuration_is_parsed() {
    let config = EngineConfig::from_json(
        r#"{
            "rules": { "redundant-true-loop-condition": { "enabled": false } },
            "categories": { "practices_and_improvements": { "severity": "hint" } },
            "max_query_depth": 8
        }"#,
    )
    .expect("configuration should parse");

    assert!(!config.is_enabled("redundant-true-loop-condition", Category::RedundanciesInCode));
    assert_eq!(
        config.severity_for(
            "mistaken-type-introspection-call",
            Category::PracticesAndImprovements,
            Severity::Warning
        ),
        Severity::Hint
    );
    assert_eq!(config.max_query_depth(), 8);
}

#[test]
fn empty_json_gives_defaults() {
    let config = EngineConfig::from_json("{}").expect("empty object should parse");
    assert_eq!(config, EngineConfig::default());
}

#[rstest]
#[case::unknown_field(r#"{ "max_depth": 3 }"#)]
#[case::bad_severity(r#"{ "rules": { "x": { "severity": "fatal" } } }"#)]
#[case::not_json("rules = []")]
fn malformed_json_is_rejected(#[case] text: &str) {
    let err = EngineConfig::from_json(text).expect_err("configuration should be rejected");
    assert!(matches!(err, ConfigError::Json { .. }), "unexpected error: {err}");
}

#[test]
fn zero_depth_is_rejected() {
    let err = EngineConfig::from_json(r#"{ "max_query_depth": 0 }"#)
        .expect_err("zero depth should be rejected");
    assert!(matches!(err, ConfigError::ZeroQueryDepth));
}

#[test]
fn builder_raises_zero_depth_to_one() {
    assert_eq!(EngineConfig::default().with_max_query_depth(0).max_query_depth(), 1);
}
