//! Positioned cursors over green trees.
//!
//! A [`SyntaxNode`] wraps a rowan cursor, which pairs a green node with its
//! absolute offset and its parent. Roles are read from the parent's shape
//! on demand. Cursors are created while walking down from the root and are
//! cheap to clone.

use std::fmt;

use rowan::{NodeOrToken, TextSize};

use crate::grammar::Role;
use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::kind::{MenderLanguage, SyntaxKind};
use crate::span::Span;

type RowanNode = rowan::SyntaxNode<MenderLanguage>;
type RowanToken = rowan::SyntaxToken<MenderLanguage>;

fn span_of(range: rowan::TextRange) -> Span {
    Span::new(usize::from(range.start()), usize::from(range.len()))
}

/// A node positioned within a tree.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxNode(RowanNode);

impl SyntaxNode {
    pub(crate) fn new_root(green: GreenNode) -> Self {
        Self(RowanNode::new_root(green.into_raw()))
    }

    pub(crate) const fn raw(&self) -> &RowanNode {
        &self.0
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// Returns the underlying green node.
    #[must_use]
    pub fn green(&self) -> GreenNode {
        GreenNode::from_raw(self.0.green().into_owned())
    }

    /// Returns the parent node, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(Self)
    }

    /// Returns the position of this node among its parent's children.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0.index()
    }

    /// Returns the role this node plays in its parent.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        let parent = self.parent()?;
        parent.green().roles().get(self.index()).copied()
    }

    /// Returns the span including leading trivia.
    #[must_use]
    pub fn full_span(&self) -> Span {
        span_of(self.0.text_range())
    }

    /// Returns the span excluding leading trivia.
    #[must_use]
    pub fn span(&self) -> Span {
        let full = self.full_span();
        let trivia = self.leading_trivia().len();
        Span::from_bounds(full.start() + trivia, full.end())
    }

    /// Returns the leading trivia of the node's first token.
    #[must_use]
    pub fn leading_trivia(&self) -> String {
        self.first_token()
            .map(|token| token.leading_trivia().to_owned())
            .unwrap_or_default()
    }

    /// Returns the source text of the node without its leading trivia.
    #[must_use]
    pub fn text(&self) -> String {
        let full = self.full_text();
        full.get(self.leading_trivia().len()..)
            .unwrap_or_default()
            .to_owned()
    }

    /// Returns the source text including leading trivia.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.0.text().to_string()
    }

    /// Returns the children, nodes and tokens, in source order.
    pub fn children_with_tokens(&self) -> impl Iterator<Item = SyntaxElement> + use<> {
        self.0.children_with_tokens().map(SyntaxElement::from_raw)
    }

    /// Returns the children paired with the role each plays.
    fn children_with_roles(&self) -> impl Iterator<Item = (SyntaxElement, Role)> + use<> {
        self.children_with_tokens().zip(self.green().roles())
    }

    /// Returns the child nodes in source order.
    pub fn children(&self) -> impl Iterator<Item = Self> + use<> {
        self.0.children().map(Self)
    }

    /// Returns the first child playing `role`.
    #[must_use]
    pub fn child_by_role(&self, role: Role) -> Option<SyntaxElement> {
        self.children_with_roles()
            .find(|(_, candidate)| *candidate == role)
            .map(|(child, _)| child)
    }

    /// Returns the first child node playing `role`.
    #[must_use]
    pub fn node_by_role(&self, role: Role) -> Option<Self> {
        self.child_by_role(role).and_then(SyntaxElement::into_node)
    }

    /// Returns the first child token playing `role`.
    #[must_use]
    pub fn token_by_role(&self, role: Role) -> Option<SyntaxToken> {
        self.child_by_role(role).and_then(SyntaxElement::into_token)
    }

    /// Returns every child node playing `role`.
    #[must_use]
    pub fn nodes_by_role(&self, role: Role) -> Vec<Self> {
        self.children_with_roles()
            .filter(|(_, candidate)| *candidate == role)
            .filter_map(|(child, _)| child.into_node())
            .collect()
    }

    /// Returns every child token playing `role`.
    #[must_use]
    pub fn tokens_by_role(&self, role: Role) -> Vec<SyntaxToken> {
        self.children_with_roles()
            .filter(|(_, candidate)| *candidate == role)
            .filter_map(|(child, _)| child.into_token())
            .collect()
    }

    /// Returns the first child node of `kind`.
    #[must_use]
    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<Self> {
        self.children().find(|child| child.kind() == kind)
    }

    /// Returns this node followed by each of its ancestors up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<> {
        self.0.ancestors().map(Self)
    }

    /// Returns the nearest ancestor (including this node) of `kind`.
    #[must_use]
    pub fn ancestor_of_kind(&self, kind: SyntaxKind) -> Option<Self> {
        self.ancestors().find(|node| node.kind() == kind)
    }

    /// Returns this node and every descendant node in pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = Self> + use<> {
        self.0.descendants().map(Self)
    }

    /// Returns every token in the subtree in source order.
    #[must_use]
    pub fn descendant_tokens(&self) -> Vec<SyntaxToken> {
        self.raw_tokens().map(SyntaxToken).collect()
    }

    fn raw_tokens(&self) -> impl Iterator<Item = RowanToken> + use<> {
        self.0
            .descendants_with_tokens()
            .filter_map(NodeOrToken::into_token)
    }

    /// Returns the root of the tree this node belongs to.
    #[must_use]
    pub fn root(&self) -> Self {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }

    /// Returns the first token of the subtree.
    #[must_use]
    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.raw_tokens().next().map(SyntaxToken)
    }

    /// Returns the last token of the subtree.
    #[must_use]
    pub fn last_token(&self) -> Option<SyntaxToken> {
        self.raw_tokens().last().map(SyntaxToken)
    }

    /// Returns the token whose full span (trivia included) covers `offset`.
    /// An offset at the very end of the node resolves to its last token.
    #[must_use]
    pub fn token_at_offset(&self, offset: usize) -> Option<SyntaxToken> {
        let full = self.full_span();
        if offset < full.start() || offset > full.end() {
            return None;
        }
        if offset == full.end() {
            return self.last_token();
        }
        let offset = TextSize::try_from(offset).ok()?;
        self.0.token_at_offset(offset).right_biased().map(SyntaxToken)
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind(), self.span())
    }
}

/// A token positioned within a tree.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxToken(RowanToken);

impl SyntaxToken {
    fn split(&self) -> (&str, &str) {
        let full = self.0.text();
        let trivia = crate::parser::lexer::leading_trivia_len(full);
        full.split_at_checked(trivia).unwrap_or(("", full))
    }

    /// Returns the token kind.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// Returns the token text without trivia.
    #[must_use]
    pub fn text(&self) -> &str {
        self.split().1
    }

    /// Returns the leading trivia.
    #[must_use]
    pub fn leading_trivia(&self) -> &str {
        self.split().0
    }

    /// Returns the underlying green token.
    #[must_use]
    pub fn green(&self) -> GreenToken {
        GreenToken::from_raw(self.0.green().to_owned())
    }

    /// Returns the node containing this token.
    #[must_use]
    pub fn parent(&self) -> Option<SyntaxNode> {
        self.0.parent().map(SyntaxNode)
    }

    /// Returns the position of this token among its parent's children.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0.index()
    }

    /// Returns the role this token plays in its parent.
    #[must_use]
    pub fn role(&self) -> Role {
        self.parent()
            .and_then(|parent| parent.green().roles().get(self.index()).copied())
            .unwrap_or(Role::Error)
    }

    /// Returns the span including leading trivia.
    #[must_use]
    pub fn full_span(&self) -> Span {
        span_of(self.0.text_range())
    }

    /// Returns the span of the token text.
    #[must_use]
    pub fn span(&self) -> Span {
        let full = self.full_span();
        Span::from_bounds(full.start() + self.leading_trivia().len(), full.end())
    }

    /// Returns whether the token was inserted by error recovery.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.text().is_empty() && self.kind() != SyntaxKind::EndOfFileToken
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} {:?}", self.kind(), self.span(), self.text())
    }
}

/// A positioned node or token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxElement {
    /// An interior node.
    Node(SyntaxNode),
    /// A token.
    Token(SyntaxToken),
}

impl SyntaxElement {
    fn from_raw(raw: rowan::SyntaxElement<MenderLanguage>) -> Self {
        match raw {
            NodeOrToken::Node(node) => Self::Node(SyntaxNode(node)),
            NodeOrToken::Token(token) => Self::Token(SyntaxToken(token)),
        }
    }

    /// Returns the element kind.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    /// Returns the role the element plays in its parent.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Node(node) => node.role(),
            Self::Token(token) => Some(token.role()),
        }
    }

    /// Returns the span excluding leading trivia.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Node(node) => node.span(),
            Self::Token(token) => token.span(),
        }
    }

    /// Returns the span including leading trivia.
    #[must_use]
    pub fn full_span(&self) -> Span {
        match self {
            Self::Node(node) => node.full_span(),
            Self::Token(token) => token.full_span(),
        }
    }

    /// Returns the green payload of the element.
    #[must_use]
    pub fn green(&self) -> GreenElement {
        match self {
            Self::Node(node) => GreenElement::Node(node.green()),
            Self::Token(token) => GreenElement::Token(token.green()),
        }
    }

    /// Converts into the node, if this element is one.
    #[must_use]
    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    /// Converts into the token, if this element is one.
    #[must_use]
    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }
}
