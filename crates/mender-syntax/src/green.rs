//! Position-independent tree payload, stored as rowan green trees.
//!
//! Green nodes and tokens know their kind, text and width but not where they
//! sit in a file, so unchanged subtrees are shared between successive trees.
//! A token's leading trivia is stored in front of its text inside the one
//! rowan token, which keeps child indices aligned with grammar roles.
//! Building a [`GreenNode`] checks its children against the node kind's
//! shape.

use std::ops::Range;

use rowan::{GreenNodeData, GreenTokenData, NodeOrToken};

use crate::error::SyntaxError;
use crate::grammar::{Role, assign_roles};
use crate::kind::{MenderLanguage, SyntaxKind};
use crate::parser::lexer::leading_trivia_len;
use crate::span::Span;

type RawElement<'a> = NodeOrToken<&'a GreenNodeData, &'a GreenTokenData>;

fn kind_of(raw: rowan::SyntaxKind) -> SyntaxKind {
    <MenderLanguage as rowan::Language>::kind_from_raw(raw)
}

/// Splits a rowan token's text into its leading trivia and the token text.
fn split_token_text(full: &str) -> (&str, &str) {
    full.split_at_checked(leading_trivia_len(full))
        .unwrap_or(("", full))
}

fn token_full_len(data: &GreenTokenData) -> usize {
    usize::from(data.text_len())
}

/// A token with its leading trivia.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GreenToken(rowan::GreenToken);

impl GreenToken {
    /// Creates a token.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Malformed`] when `kind` is a node kind, or
    /// when `leading_trivia` is not whitespace and comments that end where
    /// `text` begins.
    pub fn new(
        kind: SyntaxKind,
        leading_trivia: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, SyntaxError> {
        if kind.is_node() {
            return Err(SyntaxError::malformed(kind, "node kinds cannot be tokens"));
        }
        let mut full = leading_trivia.into();
        let trivia_len = full.len();
        full.push_str(&text.into());
        if leading_trivia_len(&full) != trivia_len {
            return Err(SyntaxError::malformed(
                kind,
                format!("{full:?} does not split into trivia and text at byte {trivia_len}"),
            ));
        }
        Ok(Self(rowan::GreenToken::new(kind.into(), &full)))
    }

    /// Creates a zero-width token standing in for one the source lacks.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Malformed`] when `kind` is a node kind.
    pub fn missing(kind: SyntaxKind) -> Result<Self, SyntaxError> {
        Self::new(kind, String::new(), String::new())
    }

    pub(crate) const fn from_raw(raw: rowan::GreenToken) -> Self {
        Self(raw)
    }

    pub(crate) fn into_raw(self) -> rowan::GreenToken {
        self.0
    }

    /// Returns the token kind.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        kind_of(self.0.kind())
    }

    /// Returns the token text without trivia.
    #[must_use]
    pub fn text(&self) -> &str {
        split_token_text(self.0.text()).1
    }

    /// Returns the whitespace and comments preceding the token.
    #[must_use]
    pub fn leading_trivia(&self) -> &str {
        split_token_text(self.0.text()).0
    }

    /// Returns the width including leading trivia.
    #[must_use]
    pub fn full_len(&self) -> usize {
        token_full_len(&self.0)
    }

    /// Returns whether the token was inserted by error recovery.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.text().is_empty() && self.kind() != SyntaxKind::EndOfFileToken
    }

    /// Returns a copy of this token with different leading trivia.
    ///
    /// # Errors
    ///
    /// As for [`Self::new`].
    pub fn with_leading_trivia(&self, trivia: impl Into<String>) -> Result<Self, SyntaxError> {
        Self::new(self.kind(), trivia, self.text())
    }

    /// Returns whether both handles share one allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq::<GreenTokenData>(&*self.0, &*other.0)
    }
}

/// An interior node whose children fit its kind's shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GreenNode(rowan::GreenNode);

impl GreenNode {
    /// Creates a node after checking `children` against the shape of
    /// `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Malformed`] when the children do not fit.
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Result<Self, SyntaxError> {
        let kinds: Vec<SyntaxKind> = children.iter().map(GreenElement::kind).collect();
        assign_roles(kind, &kinds)?;
        Ok(Self(rowan::GreenNode::new(
            kind.into(),
            children.into_iter().map(GreenElement::into_raw),
        )))
    }

    pub(crate) const fn from_raw(raw: rowan::GreenNode) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(&self) -> &rowan::GreenNode {
        &self.0
    }

    pub(crate) fn into_raw(self) -> rowan::GreenNode {
        self.0
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        kind_of(self.0.kind())
    }

    /// Returns the children in source order.
    #[must_use]
    pub fn children(&self) -> Vec<GreenElement> {
        self.0.children().map(GreenElement::from_raw).collect()
    }

    /// Returns the number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.0.children().len()
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<GreenElement> {
        self.0.children().nth(index).map(GreenElement::from_raw)
    }

    fn child_kinds(&self) -> Vec<SyntaxKind> {
        self.0.children().map(|child| kind_of(child.kind())).collect()
    }

    /// Returns the role of each child, parallel to [`Self::children`].
    ///
    /// Nodes are checked when built, so every child has a role; a node
    /// whose shape check fails reports [`Role::Error`] for each child.
    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        let kinds = self.child_kinds();
        assign_roles(self.kind(), &kinds).unwrap_or_else(|_| vec![Role::Error; kinds.len()])
    }

    /// Re-runs the shape check for this node alone.
    pub(crate) fn check_shape(&self) -> Result<(), SyntaxError> {
        assign_roles(self.kind(), &self.child_kinds()).map(drop)
    }

    /// Returns the width including leading trivia.
    #[must_use]
    pub fn full_len(&self) -> usize {
        usize::from(self.0.text_len())
    }

    /// Returns the full source text of the node, trivia included.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.full_len());
        for token in tokens(&self.0) {
            out.push_str(token.text());
        }
        out
    }

    /// Returns the first token in the subtree.
    #[must_use]
    pub fn first_token(&self) -> Option<GreenToken> {
        tokens(&self.0)
            .next()
            .map(|token| GreenToken::from_raw(token.to_owned()))
    }

    /// Returns the leading trivia of the first token, or an empty string.
    #[must_use]
    pub fn leading_trivia(&self) -> &str {
        tokens(&self.0)
            .next()
            .map_or("", |token| split_token_text(token.text()).0)
    }

    /// Returns a copy of this node whose first token carries `trivia`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Malformed`] if `trivia` is not whitespace and
    /// comments.
    pub fn with_leading_trivia(&self, trivia: &str) -> Result<Self, SyntaxError> {
        let Some(index) = self
            .0
            .children()
            .position(|child| tokens_of(child).next().is_some())
        else {
            return Ok(self.clone());
        };
        let Some(child) = self.child(index) else {
            return Ok(self.clone());
        };
        let rebuilt = child.with_leading_trivia(trivia)?;
        Ok(Self(self.0.replace_child(index, rebuilt.into_raw())))
    }

    /// Returns a copy of this node with `range` of its children replaced by
    /// `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::OutOfRange`] when `range` does not lie within
    /// the children, or [`SyntaxError::Malformed`] when the result does not
    /// fit the node's shape.
    pub fn splice_children(
        &self,
        range: Range<usize>,
        replacement: Vec<GreenElement>,
    ) -> Result<Self, SyntaxError> {
        let mut kinds = self.child_kinds();
        let len = kinds.len();
        if range.start > range.end || range.end > len {
            return Err(SyntaxError::out_of_range(Span::from(range), len));
        }
        kinds.splice(range.clone(), replacement.iter().map(GreenElement::kind));
        assign_roles(self.kind(), &kinds)?;
        Ok(Self(self.0.splice_children(
            range,
            replacement.into_iter().map(GreenElement::into_raw),
        )))
    }

    /// Returns a copy of this node with the child at `index` replaced.
    ///
    /// # Errors
    ///
    /// As for [`Self::splice_children`].
    pub fn replace_child(
        &self,
        index: usize,
        replacement: impl Into<GreenElement>,
    ) -> Result<Self, SyntaxError> {
        self.splice_children(index..index.saturating_add(1), vec![replacement.into()])
    }

    /// Returns whether both handles share one allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq::<GreenNodeData>(&*self.0, &*other.0)
    }
}

/// Walks the tokens under `root` in source order without recursion.
fn tokens(root: &GreenNodeData) -> impl Iterator<Item = &GreenTokenData> {
    tokens_of(NodeOrToken::Node(root))
}

fn tokens_of(root: RawElement<'_>) -> impl Iterator<Item = &GreenTokenData> {
    let mut stack = vec![root];
    std::iter::from_fn(move || {
        while let Some(element) = stack.pop() {
            match element {
                NodeOrToken::Token(token) => return Some(token),
                NodeOrToken::Node(node) => {
                    let children: Vec<RawElement<'_>> = node.children().collect();
                    stack.extend(children.into_iter().rev());
                }
            }
        }
        None
    })
}

/// A child of a green node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GreenElement {
    /// An interior node.
    Node(GreenNode),
    /// A token.
    Token(GreenToken),
}

impl GreenElement {
    fn from_raw(raw: RawElement<'_>) -> Self {
        match raw {
            NodeOrToken::Node(node) => Self::Node(GreenNode::from_raw(node.to_owned())),
            NodeOrToken::Token(token) => Self::Token(GreenToken::from_raw(token.to_owned())),
        }
    }

    fn into_raw(self) -> NodeOrToken<rowan::GreenNode, rowan::GreenToken> {
        match self {
            Self::Node(node) => NodeOrToken::Node(node.into_raw()),
            Self::Token(token) => NodeOrToken::Token(token.into_raw()),
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

    /// Returns the width including leading trivia.
    #[must_use]
    pub fn full_len(&self) -> usize {
        match self {
            Self::Node(node) => node.full_len(),
            Self::Token(token) => token.full_len(),
        }
    }

    /// Returns the node, if this element is one.
    #[must_use]
    pub const fn as_node(&self) -> Option<&GreenNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    /// Returns the token, if this element is one.
    #[must_use]
    pub const fn as_token(&self) -> Option<&GreenToken> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }

    /// Returns the first token of the element.
    #[must_use]
    pub fn first_token(&self) -> Option<GreenToken> {
        match self {
            Self::Node(node) => node.first_token(),
            Self::Token(token) => Some(token.clone()),
        }
    }

    /// Returns the leading trivia of the first token, or an empty string.
    #[must_use]
    pub fn leading_trivia(&self) -> &str {
        match self {
            Self::Node(node) => node.leading_trivia(),
            Self::Token(token) => token.leading_trivia(),
        }
    }

    /// Returns a copy whose first token carries `trivia`.
    ///
    /// # Errors
    ///
    /// As for [`GreenNode::with_leading_trivia`].
    pub fn with_leading_trivia(&self, trivia: &str) -> Result<Self, SyntaxError> {
        Ok(match self {
            Self::Node(node) => Self::Node(node.with_leading_trivia(trivia)?),
            Self::Token(token) => Self::Token(token.with_leading_trivia(trivia)?),
        })
    }

    /// Returns the full source text of the element.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Node(node) => node.text(),
            Self::Token(token) => format!("{}{}", token.leading_trivia(), token.text()),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        Self::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        Self::Token(token)
    }
}
