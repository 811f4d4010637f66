//! Tests for diagnostic aggregation.

use insta::assert_snapshot;
use mender_core::{Category, EngineConfig, RuleOverride, Severity};
use mender_syntax::LineCol;

use super::{parse, span_of};
use crate::{DiagnosticReporter, Finding, RuleDescriptor, RuleMode};

const FIRST: RuleDescriptor = RuleDescriptor::new(
    "first",
    "First",
    Category::CodeQuality,
    Severity::Warning,
    RuleMode::Analyzer,
);

const SECOND: RuleDescriptor = RuleDescriptor::new(
    "second",
    "Second",
    Category::RedundanciesInCode,
    Severity::Suggestion,
    RuleMode::Analyzer,
);

const SOURCE: &str = "class C {\n    int a;\n    int b;\n}";

#[test]
fn orders_by_rule_then_visit() {
    let tree = parse(SOURCE);
    let config = EngineConfig::default();
    let mut reporter = DiagnosticReporter::new(&tree, &config);

    reporter.record(1, 2, &SECOND, &Finding::new(span_of(&tree, "b;"), "b second"));
    reporter.record(0, 4, &FIRST, &Finding::new(span_of(&tree, "b;"), "b first"));
    reporter.record(0, 1, &FIRST, &Finding::new(span_of(&tree, "a;"), "a first"));
    assert_eq!(reporter.len(), 3);

    let messages: Vec<String> = reporter
        .finish()
        .iter()
        .map(|diagnostic| diagnostic.message().to_owned())
        .collect();
    assert_eq!(messages, ["a first", "b first", "b second"]);
}

#[test]
fn applies_configured_severity() {
    let tree = parse(SOURCE);
    let config = EngineConfig::default()
        .with_category(Category::RedundanciesInCode, RuleOverride::with_severity(Severity::Error));
    let mut reporter = DiagnosticReporter::new(&tree, &config);

    reporter.record(0, 0, &FIRST, &Finding::new(span_of(&tree, "a;"), "kept"));
    reporter.record(1, 0, &SECOND, &Finding::new(span_of(&tree, "b;"), "raised"));

    let severities: Vec<Severity> = reporter
        .finish()
        .iter()
        .map(mender_core::Diagnostic::severity)
        .collect();
    assert_eq!(severities, [Severity::Warning, Severity::Error]);
}

#[test]
fn positions_are_one_based() {
    let tree = parse(SOURCE);
    let config = EngineConfig::default();
    let mut reporter = DiagnosticReporter::new(&tree, &config);
    reporter.record(0, 0, &FIRST, &Finding::new(span_of(&tree, "b;"), "b"));

    let diagnostics = reporter.finish();
    let diagnostic = diagnostics.first().expect("one diagnostic");
    assert_eq!(diagnostic.start(), LineCol { line: 3, column: 9 });
    assert_eq!(diagnostic.category(), Category::CodeQuality);
}

#[test]
fn diagnostics_serialise_for_hosts() {
    let tree = parse(SOURCE);
    let config = EngineConfig::default();
    let mut reporter = DiagnosticReporter::new(&tree, &config);
    reporter.record(0, 0, &FIRST, &Finding::new(span_of(&tree, "a;"), "field a"));

    let json = serde_json::to_value(reporter.finish()).expect("serialise diagnostics");
    let rule_id = json
        .get(0)
        .and_then(|diagnostic| diagnostic.get("rule_id"))
        .and_then(serde_json::Value::as_str);
    assert_eq!(rule_id, Some("first"));
}

#[test]
fn empty_reporter_finishes_empty() {
    let tree = parse(SOURCE);
    let config = EngineConfig::default();
    let reporter = DiagnosticReporter::new(&tree, &config);

    assert!(reporter.is_empty());
    assert_snapshot!(format!("{:?}", reporter.finish()), @"[]");
}
