//! Tests for telemetry targets and filter construction.

use rstest::rstest;
use tracing::trace;

use super::captured_logs;
use crate::telemetry::{ENGINE_TARGET, RULES_TARGET, TelemetryError, build_filter, target};
use crate::{LogArea, LogFormat, LogLevel, TelemetryConfig};

#[rstest]
#[case("info")]
#[case("mender=debug,mender_syntax=warn")]
#[case("mender::engine=trace")]
fn accepts_valid_directives(#[case] directive: &str) {
    let config = TelemetryConfig::new(directive, LogFormat::Compact);
    build_filter(&config).expect("filter should parse");
}

#[test]
fn rejects_invalid_directive() {
    let config = TelemetryConfig::new("mender=[", LogFormat::Json);
    let error = build_filter(&config).expect_err("filter should be rejected");
    assert!(matches!(error, TelemetryError::Filter(_)));
    assert!(error.to_string().starts_with("invalid log filter: "));
}

#[rstest]
#[case(LogArea::Engine, "mender::engine")]
#[case(LogArea::Rules, "mender::rules")]
#[case(LogArea::Action, "mender::action")]
#[case(LogArea::Registry, "mender::registry")]
fn areas_log_under_crate_targets(#[case] area: LogArea, #[case] expected: &str) {
    assert_eq!(target(area), expected);
}

#[test]
fn area_levels_become_directives() {
    let config = TelemetryConfig::new("warn", LogFormat::Compact)
        .with_area(LogArea::Rules, LogLevel::Trace)
        .with_area(LogArea::Registry, LogLevel::Off);
    let filter = build_filter(&config).expect("filter should parse").to_string();

    assert!(filter.contains("mender::rules=trace"), "{filter}");
    assert!(filter.contains("mender::registry=off"), "{filter}");
    assert!(!filter.contains("mender::engine"), "{filter}");
}

#[test]
fn area_levels_override_the_base_filter() {
    let config = TelemetryConfig::new("warn", LogFormat::Compact)
        .with_area(LogArea::Rules, LogLevel::Trace);
    let filter = build_filter(&config).expect("filter should parse").to_string();

    let logs = captured_logs(&filter, || {
        trace!(target: RULES_TARGET, "rule declined");
        trace!(target: ENGINE_TARGET, "walk step");
    });
    assert!(logs.contains("rule declined"), "{logs}");
    assert!(!logs.contains("walk step"), "{logs}");
}
