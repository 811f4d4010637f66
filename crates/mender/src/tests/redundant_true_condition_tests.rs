//! Tests for the redundant `true` loop condition rule.

use insta::assert_snapshot;
use mender_core::{CancellationToken, SymbolTable};
use rstest::rstest;

use super::{apply_single, parse, query_rule, span_of};
use crate::{RuleEngine, Severity};

const RULE: &str = "redundant-true-loop-condition";

#[test]
fn removes_true_and_keeps_spacing() {
    let tree = parse("class C { void M() { for (; true; i++) { } } }");
    let model = SymbolTable::builder().build();

    let actions = query_rule(RULE, &tree, &model, span_of(&tree, "true"));
    let action = actions.first().expect("one action");
    assert_eq!(action.title(), "Remove 'true'");

    let edited = apply_single(&actions, &tree);
    assert_snapshot!(edited.text(), @"class C { void M() { for (; ; i++) { } } }");
    assert_eq!(tree.text(), "class C { void M() { for (; true; i++) { } } }");
}

#[rstest]
#[case::spaced_semicolon(
    "class C { void M() { for (int i = 0; true ; i++) { } } }",
    "class C { void M() { for (int i = 0;  ; i++) { } } }"
)]
#[case::comment_before_condition(
    "class C { void M() { for (; /*c*/ true ; ) { } } }",
    "class C { void M() { for (; /*c*/  ; ) { } } }"
)]
#[case::line_comment_before_condition(
    "class C { void M() { for (; // forever\n true; ) { } } }",
    "class C { void M() { for (; // forever\n ; ) { } } }"
)]
fn condition_trivia_moves_before_semicolon(#[case] source: &str, #[case] expected: &str) {
    let tree = parse(source);
    let model = SymbolTable::builder().build();

    let actions = query_rule(RULE, &tree, &model, span_of(&tree, "true"));
    let edited = apply_single(&actions, &tree);
    assert_eq!(edited.text(), expected);
}

#[rstest]
#[case("class C { void M() { for (; false; i++) { } } }")]
#[case("class C { void M() { for (; i < 10; i++) { } } }")]
#[case("class C { void M() { for (;;) { } } }")]
#[case("class C { void M() { while (true) { } } }")]
fn other_conditions_are_ignored(#[case] source: &str) {
    let tree = parse(source);
    let model = SymbolTable::builder().build();

    let diagnostics = RuleEngine::new(super::builtin())
        .scan(&tree, &model, &CancellationToken::new())
        .expect("scan should succeed");
    assert!(diagnostics.iter().all(|diagnostic| diagnostic.rule_id() != RULE));
}

#[test]
fn scan_reports_condition_span() {
    let tree = parse("class C {\n    void M() {\n        for (; true; ) { }\n    }\n}");
    let model = SymbolTable::builder().build();

    let diagnostics = RuleEngine::new(super::builtin())
        .scan(&tree, &model, &CancellationToken::new())
        .expect("scan should succeed");
    let [diagnostic] = diagnostics.as_slice() else {
        panic!("expected one diagnostic, got {diagnostics:?}");
    };
    assert_eq!(diagnostic.span(), span_of(&tree, "true"));
    assert_eq!(diagnostic.severity(), Severity::Warning);
    assert_snapshot!(
        diagnostic.to_string(),
        @"3:16 warning [redundant-true-loop-condition] 'true' is redundant as for statement condition"
    );
}

#[test]
fn query_outside_condition_offers_nothing() {
    let tree = parse("class C { void M() { for (; true; i++) { } } }");
    let model = SymbolTable::builder().build();

    let actions = query_rule(RULE, &tree, &model, span_of(&tree, "M()"));
    assert!(actions.is_empty());
}
