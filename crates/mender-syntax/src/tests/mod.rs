//! Unit tests for `mender_syntax`.

mod tree_tests;

use crate::{Parser, SyntaxKind, SyntaxNode, SyntaxTree};

/// Parses `source`, failing the test on a parser defect.
fn parse(source: &str) -> SyntaxTree {
    Parser::new().parse(source).expect("parse")
}

/// Returns the first node of `kind` in pre-order.
fn first(tree: &SyntaxTree, kind: SyntaxKind) -> SyntaxNode {
    tree.root()
        .descendants()
        .find(|node| node.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind} in {:?}", tree.text()))
}
