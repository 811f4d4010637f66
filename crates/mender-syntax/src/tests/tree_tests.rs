//! Tests for [`SyntaxTree`] queries and persistent replacement.

use rstest::{fixture, rstest};

use super::{first, parse};
use crate::{Replacement, Span, SyntaxError, SyntaxKind, SyntaxNode, SyntaxTree, make};

const LOOPS: &str = "class C {\n    void M() { for (; true; i++) { } }\n    void N() { }\n}";

#[fixture]
fn loops() -> SyntaxTree {
    parse(LOOPS)
}

fn methods(tree: &SyntaxTree) -> Vec<SyntaxNode> {
    tree.root()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::MethodDeclaration)
        .collect()
}

// =============================================================================
// Queries
// =============================================================================

#[rstest]
fn covering_node_finds_innermost_node(loops: SyntaxTree) {
    let start = LOOPS.find("true").expect("literal offset");
    let node = loops
        .covering_node(Span::new(start, 4))
        .expect("covering node");
    assert_eq!(node.kind(), SyntaxKind::LiteralExpression);
}

#[rstest]
fn covering_node_of_empty_span_on_name_is_the_member(loops: SyntaxTree) {
    let start = LOOPS.find("N()").expect("name offset");
    let node = loops
        .covering_node(Span::empty(start))
        .expect("covering node");
    assert_eq!(node.kind(), SyntaxKind::MethodDeclaration);
}

#[rstest]
fn covering_node_beyond_text_is_none(loops: SyntaxTree) {
    assert!(loops.covering_node(Span::new(LOOPS.len(), 1)).is_none());
    assert!(loops.covering_node(Span::empty(LOOPS.len())).is_some());
}

#[rstest]
fn find_node_requires_exact_span_and_kind(loops: SyntaxTree) {
    let literal = first(&loops, SyntaxKind::LiteralExpression);
    let span = literal.span();
    assert_eq!(loops.find_node(span, SyntaxKind::LiteralExpression), Some(literal));
    assert!(loops.find_node(span, SyntaxKind::Block).is_none());
}

#[rstest]
fn ancestors_start_at_the_node_and_end_at_the_root(loops: SyntaxTree) {
    let literal = first(&loops, SyntaxKind::LiteralExpression);
    let kinds: Vec<SyntaxKind> = literal.ancestors().map(|node| node.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::LiteralExpression,
            SyntaxKind::ForStatement,
            SyntaxKind::Block,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::ClassDeclaration,
            SyntaxKind::CompilationUnit,
        ]
    );
}

// =============================================================================
// Replacement
// =============================================================================

#[rstest]
fn replace_returns_new_tree_and_keeps_original(loops: SyntaxTree) {
    let literal = first(&loops, SyntaxKind::LiteralExpression);
    let edited = loops
        .replace(&literal, Replacement::remove())
        .expect("replace");

    assert_eq!(
        edited.text(),
        "class C {\n    void M() { for (;; i++) { } }\n    void N() { }\n}"
    );
    assert_eq!(loops.text(), LOOPS);
    edited.validate().expect("valid tree");
}

#[rstest]
fn replace_shares_untouched_subtrees(loops: SyntaxTree) {
    let literal = first(&loops, SyntaxKind::LiteralExpression);
    let edited = loops
        .replace(&literal, Replacement::remove())
        .expect("replace");

    let before = methods(&loops);
    let after = methods(&edited);
    let untouched_before = before.get(1).expect("method N before");
    let untouched_after = after.get(1).expect("method N after");
    assert!(untouched_before.green().ptr_eq(&untouched_after.green()));

    let edited_before = before.first().expect("method M before");
    let edited_after = after.first().expect("method M after");
    assert!(!edited_before.green().ptr_eq(&edited_after.green()));
}

#[test]
fn replace_splices_several_elements() {
    let tree = parse("class C { void M() { a(); } }");
    let statement = first(&tree, SyntaxKind::ExpressionStatement);
    let replacement = Replacement::new(vec![
        make::statement(" b();").expect("b").into(),
        make::statement(" c();").expect("c").into(),
    ]);

    let edited = tree.replace(&statement, replacement).expect("replace");
    assert_eq!(edited.text(), "class C { void M() { b(); c(); } }");
}

#[rstest]
fn replace_rejects_foreign_nodes(loops: SyntaxTree) {
    let other = parse(LOOPS);
    let foreign = first(&other, SyntaxKind::LiteralExpression);
    let result = loops.replace(&foreign, Replacement::remove());
    assert!(matches!(result, Err(SyntaxError::ForeignNode { .. })));
}

#[rstest]
fn replace_rejects_shape_violations(loops: SyntaxTree) {
    let parameters = first(&loops, SyntaxKind::ParameterList);
    let result = loops.replace(&parameters, Replacement::remove());
    assert!(result.is_err_and(|err| err.is_malformed()));
}

#[rstest]
fn replace_rejects_removing_the_root(loops: SyntaxTree) {
    let result = loops.replace(&loops.root(), Replacement::remove());
    assert!(result.is_err_and(|err| err.is_malformed()));
}

// =============================================================================
// Snapshot Identity
// =============================================================================

#[rstest]
fn identical_parses_are_the_same_snapshot(loops: SyntaxTree) {
    let again = parse(LOOPS);
    assert!(loops.is_same_snapshot(&again));
    assert!(loops.is_same_snapshot(&loops.clone()));

    let literal = first(&loops, SyntaxKind::LiteralExpression);
    let edited = loops
        .replace(&literal, Replacement::remove())
        .expect("replace");
    assert!(!loops.is_same_snapshot(&edited));
}

// =============================================================================
// Syntax Issues
// =============================================================================

#[test]
fn errors_report_position_and_message() {
    let tree = parse("class C {\n    void M() { # }\n}");
    let issues: Vec<String> = tree.errors().iter().map(ToString::to_string).collect();
    assert_eq!(issues, vec!["2:16 unexpected \"#\"".to_owned()]);

    let issue = tree.errors().into_iter().next().expect("one issue");
    assert_eq!(issue.span(), Span::new(25, 1));
    assert_eq!(issue.message(), "unexpected \"#\"");
}

#[rstest]
fn text_of_a_node_excludes_leading_trivia(loops: SyntaxTree) {
    let method = methods(&loops).into_iter().nth(1).expect("method N");
    assert_eq!(method.leading_trivia(), "\n    ");
    assert_eq!(method.text(), "void N() { }");
    assert_eq!(method.full_text(), "\n    void N() { }");
}
