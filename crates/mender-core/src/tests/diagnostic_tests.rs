//! Tests for [`Diagnostic`], [`Severity`] and [`Category`].

use insta::assert_snapshot;
use mender_syntax::{LineCol, Span};
use rstest::rstest;

use crate::{Category, Diagnostic, Severity};

fn sample() -> Diagnostic {
    Diagnostic::new(
        "redundant-true-loop-condition",
        Span::new(30, 4),
        Severity::Warning,
        Category::RedundanciesInCode,
        "'true' is redundant as for statement condition",
        LineCol { line: 2, column: 17 },
    )
}

#[test]
fn accessors_return_constructor_values() {
    let diagnostic = sample();
    assert_eq!(diagnostic.rule_id(), "redundant-true-loop-condition");
    assert_eq!(diagnostic.span(), Span::new(30, 4));
    assert_eq!(diagnostic.severity(), Severity::Warning);
    assert_eq!(diagnostic.category(), Category::RedundanciesInCode);
    assert_eq!(diagnostic.start(), LineCol { line: 2, column: 17 });
}

#[test]
fn display_includes_position_and_rule() {
    assert_snapshot!(
        sample().to_string(),
        @"2:17 warning [redundant-true-loop-condition] 'true' is redundant as for statement condition"
    );
}

#[test]
fn serialises_to_json() {
    let json = serde_json::to_string(&sample()).expect("serialise diagnostic");
    assert_snapshot!(
        json,
        @r#"{"rule_id":"redundant-true-loop-condition","span":{"start":30,"length":4},"severity":"warning","category":"redundancies_in_code","message":"'true' is redundant as for statement condition","start":{"line":2,"column":17}}"#
    );
    let back: Diagnostic = serde_json::from_str(&json).expect("deserialise diagnostic");
    assert_eq!(back, sample());
}

#[test]
fn severities_are_ordered() {
    assert!(Severity::Hint < Severity::Suggestion);
    assert!(Severity::Suggestion < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
}

#[rstest]
#[case(Category::RedundanciesInCode, "Redundancies in code", "redundancies_in_code")]
#[case(Category::PracticesAndImprovements, "Practices and improvements", "practices_and_improvements")]
#[case(Category::CodeQuality, "Code quality", "code_quality")]
#[case(Category::Refactorings, "Refactorings", "refactorings")]
fn category_titles_and_names(#[case] category: Category, #[case] title: &str, #[case] name: &str) {
    assert_eq!(category.to_string(), title);
    assert_eq!(name.parse::<Category>().expect("parse category"), category);
}

#[test]
fn severity_parses_case_insensitively() {
    assert_eq!("WARNING".parse::<Severity>().expect("parse severity"), Severity::Warning);
    assert!("fatal".parse::<Severity>().is_err());
}
