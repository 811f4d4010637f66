//! End-to-end tests for mender-syntax using insta for snapshot testing.
//!
//! These tests exercise the public API from parsing through replacement and
//! snapshot the user-facing outputs.

use insta::assert_snapshot;
use rstest::{fixture, rstest};

use mender_syntax::{Parser, Replacement, Role, SyntaxElement, SyntaxKind, SyntaxNode, make};

/// Fixture providing a parser.
#[fixture]
fn parser() -> Parser {
    Parser::new()
}

fn dump(node: &SyntaxNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{node:?}\n"));
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Node(inner) => dump(&inner, depth + 1, out),
            SyntaxElement::Token(token) => {
                out.push_str(&format!("{indent}  {token:?}\n"));
            }
        }
    }
}

// =============================================================================
// Happy Path: Parsing
// =============================================================================

#[rstest]
fn snapshot_field_tree(mut parser: Parser) {
    let tree = parser
        .parse("class C { int x; }")
        .unwrap_or_else(|err| panic!("parse: {err}"));

    let mut out = String::new();
    dump(&tree.root(), 0, &mut out);
    assert_snapshot!(out.trim_end(), @r#"
    CompilationUnit@0..18
      ClassDeclaration@0..18
        ClassKeyword@0..5 "class"
        IdentifierToken@6..7 "C"
        OpenBraceToken@8..9 "{"
        FieldDeclaration@10..16
          VariableDeclaration@10..15
            PredefinedType@10..13
              IntKeyword@10..13 "int"
            IdentifierToken@14..15 "x"
          SemicolonToken@15..16 ";"
        CloseBraceToken@17..18 "}"
      EndOfFileToken@18..18 ""
    "#);
}

#[rstest]
#[case("class C { void M() { } }")]
#[case("class C\n{\n    // comment\n    int P { get; set; }\n}\n")]
#[case("class C { void M() { for (int i = 0; i < n; i++) { f(i, y: 2); } } }")]
fn parse_valid_source_round_trips(mut parser: Parser, #[case] source: &str) {
    let tree = parser
        .parse(source)
        .unwrap_or_else(|err| panic!("parse: {err}"));

    assert!(!tree.has_errors());
    assert_eq!(tree.text(), source);
}

// =============================================================================
// Unhappy Path: Parsing
// =============================================================================

#[rstest]
fn snapshot_parse_errors(mut parser: Parser) {
    let tree = parser
        .parse("class C {\n    void M( {\n        x\n    }\n")
        .unwrap_or_else(|err| panic!("parse: {err}"));

    let errors: Vec<String> = tree
        .errors()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_snapshot!(errors.join("\n"), @r"
    2:12 missing IdentifierToken
    2:12 missing IdentifierToken
    2:12 missing CloseParenToken
    3:10 missing SemicolonToken
    4:6 missing CloseBraceToken
    ");
}

// =============================================================================
// Replacement
// =============================================================================

#[rstest]
fn replacing_a_default_value_rebuilds_one_spine(mut parser: Parser) {
    let tree = parser
        .parse("class C { void F(int x, int y = 5) { } void G() { } }")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let default = tree
        .root()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::EqualsValueClause)
        .unwrap_or_else(|| panic!("default clause"));
    let value = make::expression("7").unwrap_or_else(|err| panic!("value: {err}"));
    let clause = make::equals_value_clause(&value).unwrap_or_else(|err| panic!("clause: {err}"));

    let edited = tree
        .replace(&default, Replacement::from(clause))
        .unwrap_or_else(|err| panic!("replace: {err}"));

    assert_snapshot!(edited.text(), @"class C { void F(int x, int y = 7) { } void G() { } }");
    let parameter = edited
        .root()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::Parameter)
        .last()
        .unwrap_or_else(|| panic!("parameter"));
    assert!(parameter.node_by_role(Role::Default).is_some());
}
