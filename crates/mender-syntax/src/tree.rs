//! Immutable syntax trees and persistent replacement.

use std::fmt;

use crate::error::SyntaxError;
use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::kind::SyntaxKind;
use crate::position::{LineCol, LineIndex};
use crate::red::SyntaxNode;
use crate::span::Span;

/// An immutable syntax tree rooted at a compilation unit.
///
/// Trees are never modified in place. [`SyntaxTree::replace`] returns a new
/// tree that shares every subtree off the edited spine with the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: GreenNode,
}

impl SyntaxTree {
    /// Wraps a green compilation unit.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Malformed`] when `root` is not a compilation
    /// unit.
    pub fn new(root: GreenNode) -> Result<Self, SyntaxError> {
        if root.kind() != SyntaxKind::CompilationUnit {
            return Err(SyntaxError::malformed(
                root.kind(),
                "a tree must be rooted at a compilation unit",
            ));
        }
        Ok(Self { root })
    }

    /// Returns a cursor at the root.
    #[must_use]
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.root.clone())
    }

    /// Returns the green root.
    #[must_use]
    pub const fn green(&self) -> &GreenNode {
        &self.root
    }

    /// Reproduces the source text exactly.
    #[must_use]
    pub fn text(&self) -> String {
        self.root().full_text()
    }

    /// Returns the length of the source text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.full_len()
    }

    /// Returns whether the source text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.full_len() == 0
    }

    /// Returns whether `other` is this tree or a structurally identical one.
    #[must_use]
    pub fn is_same_snapshot(&self, other: &Self) -> bool {
        self.root.ptr_eq(&other.root) || self.root == other.root
    }

    /// Returns the innermost node whose span contains `span`, or `None`
    /// when `span` extends past the end of the text.
    #[must_use]
    pub fn covering_node(&self, span: Span) -> Option<SyntaxNode> {
        if span.end() > self.len() {
            return None;
        }
        let root = self.root();
        let Some(parent) = root
            .token_at_offset(span.start())
            .and_then(|token| token.parent())
        else {
            return Some(root);
        };
        parent
            .ancestors()
            .find(|node| node.span().contains(span))
            .or(Some(root))
    }

    /// Returns the node of `kind` whose span equals `span`.
    #[must_use]
    pub fn find_node(&self, span: Span, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.covering_node(span)?
            .ancestors()
            .find(|node| node.kind() == kind && node.span() == span)
    }

    /// Replaces `target` with the elements of `replacement`, rebuilding the
    /// spine from `target` up to the root.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ForeignNode`] when `target` does not belong to
    /// this tree, and [`SyntaxError::Malformed`] when the rebuilt parent does
    /// not fit its shape.
    pub fn replace(
        &self,
        target: &SyntaxNode,
        replacement: impl Into<Replacement>,
    ) -> Result<Self, SyntaxError> {
        if !target.root().green().ptr_eq(&self.root) {
            return Err(SyntaxError::foreign_node(target.span()));
        }

        let elements = replacement.into().into_elements();
        let Some(parent) = target.parent() else {
            return match elements.as_slice() {
                [GreenElement::Node(root)] => Self::new(root.clone()),
                _ => Err(SyntaxError::malformed(
                    SyntaxKind::CompilationUnit,
                    "the root must be replaced by exactly one node",
                )),
            };
        };

        let index = target.index();
        let rebuilt = parent
            .green()
            .splice_children(index..index.saturating_add(1), elements)?;
        // The parent keeps its kind, so the ancestors above it still fit.
        let root = parent.raw().replace_with(rebuilt.into_raw());
        Self::new(GreenNode::from_raw(root))
    }

    /// Re-checks every node against its shape and the text against the
    /// recorded widths.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SyntaxError> {
        for node in self.root().descendants() {
            node.green().check_shape()?;
        }
        let text = self.text();
        if text.len() != self.len() {
            return Err(SyntaxError::internal_error(format!(
                "text length {} differs from recorded width {}",
                text.len(),
                self.len()
            )));
        }
        Ok(())
    }

    /// Returns whether the tree contains error nodes or missing tokens.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        let root = self.root();
        root.descendants().any(|node| node.kind() == SyntaxKind::Error)
            || root.descendant_tokens().iter().any(|token| token.is_missing())
    }

    /// Collects every error node and missing token in source order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxIssue> {
        let index = self.line_index();
        let root = self.root();

        let mut issues: Vec<SyntaxIssue> = root
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::Error)
            .map(|node| SyntaxIssue::new(node.span(), &index, format!("unexpected {:?}", node.text())))
            .collect();
        issues.extend(
            root.descendant_tokens()
                .into_iter()
                .filter(|token| token.is_missing())
                .map(|token| SyntaxIssue::new(token.span(), &index, format!("missing {}", token.kind()))),
        );
        issues.sort_by_key(|issue| issue.span.start());
        issues
    }

    /// Builds a line index over the tree's text.
    #[must_use]
    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text())
    }
}

/// An error node or missing token found in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    span: Span,
    start: LineCol,
    message: String,
}

impl SyntaxIssue {
    fn new(span: Span, index: &LineIndex, message: String) -> Self {
        Self {
            span,
            start: index.line_col(span.start()),
            message,
        }
    }

    /// Returns the span of the offending text; empty for a missing token.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the one-based position where the issue starts.
    #[must_use]
    pub const fn start(&self) -> LineCol {
        self.start
    }

    /// Returns the description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SyntaxIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.start.line, self.start.column, self.message)
    }
}

/// The elements that take a replaced node's place.
///
/// An empty replacement removes the node; several elements splice in
/// siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacement {
    elements: Vec<GreenElement>,
}

impl Replacement {
    /// Creates a replacement from elements.
    #[must_use]
    pub const fn new(elements: Vec<GreenElement>) -> Self {
        Self { elements }
    }

    /// Creates a replacement that removes the target.
    #[must_use]
    pub const fn remove() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Returns the replacement elements.
    #[must_use]
    pub fn elements(&self) -> &[GreenElement] {
        &self.elements
    }

    /// Consumes the replacement, returning its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<GreenElement> {
        self.elements
    }
}

impl From<GreenNode> for Replacement {
    fn from(node: GreenNode) -> Self {
        Self::new(vec![GreenElement::Node(node)])
    }
}

impl From<GreenToken> for Replacement {
    fn from(token: GreenToken) -> Self {
        Self::new(vec![GreenElement::Token(token)])
    }
}

impl From<Vec<GreenElement>> for Replacement {
    fn from(elements: Vec<GreenElement>) -> Self {
        Self::new(elements)
    }
}
