//! Error-tolerant recursive-descent parser for the reference language.
//!
//! Parsing is total: when a required token is absent a zero-width missing
//! token takes its place, and tokens that fit nowhere are wrapped in
//! [`SyntaxKind::Error`] nodes. The resulting tree always reproduces the
//! input text exactly.
//!
//! Nodes are emitted into a rowan [`GreenNodeBuilder`]; kinds that are only
//! known after their first child (binary operators, member kinds) are opened
//! retroactively from a [`Checkpoint`]. The finished tree is then checked
//! against the grammar shapes.
//!
//! Nesting is bounded by [`MAX_NESTING`]. A construct that would nest deeper
//! is kept as a flat error node, so pathological input cannot exhaust the
//! stack.

mod expressions;
mod items;
pub(crate) mod lexer;
mod statements;

use rowan::{Checkpoint, GreenNodeBuilder};

use crate::error::SyntaxError;
use crate::green::GreenNode;
use crate::kind::SyntaxKind;
use crate::tree::SyntaxTree;

use lexer::{RawToken, tokenize};

/// Deepest nesting of statements, members and expressions the parser
/// descends into.
pub const MAX_NESTING: usize = 256;

/// Parser for the reference language.
///
/// # Example
///
/// ```
/// use mender_syntax::Parser;
///
/// let mut parser = Parser::new();
/// let tree = parser.parse("class C { void M() { } }")?;
/// assert!(!tree.has_errors());
/// assert_eq!(tree.text(), "class C { void M() { } }");
/// # Ok::<(), mender_syntax::SyntaxError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser {
    _private: (),
}

impl Parser {
    /// Creates a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Parses source code into a tree.
    ///
    /// Malformed input produces error nodes and missing tokens rather than
    /// an error; use [`SyntaxTree::has_errors`] to check for them.
    ///
    /// # Errors
    ///
    /// Returns an error only if the parser builds a node that violates the
    /// grammar, which indicates a bug.
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, SyntaxError> {
        let mut state = ParseState::new(tokenize(source));
        state.compilation_unit();
        let tree = SyntaxTree::new(GreenNode::from_raw(state.finish()))?;
        tree.validate()?;
        if tree.len() != source.len() {
            return Err(SyntaxError::internal_error(format!(
                "parsed {} of {} bytes",
                tree.len(),
                source.len()
            )));
        }
        Ok(tree)
    }
}

/// Cursor over the token stream feeding a green tree builder.
pub(crate) struct ParseState<'a> {
    tokens: Vec<RawToken<'a>>,
    pos: usize,
    depth: usize,
    builder: GreenNodeBuilder<'static>,
}

impl<'a> ParseState<'a> {
    fn new(tokens: Vec<RawToken<'a>>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            builder: GreenNodeBuilder::new(),
        }
    }

    fn finish(self) -> rowan::GreenNode {
        self.builder.finish()
    }

    fn nth_token(&self, n: usize) -> Option<RawToken<'a>> {
        self.tokens
            .get(self.pos.saturating_add(n))
            .or_else(|| self.tokens.last())
            .copied()
    }

    /// Kind of the token `n` positions ahead; end-of-file past the end.
    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n)
            .map_or(SyntaxKind::EndOfFileToken, |token| token.kind)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EndOfFileToken)
    }

    /// Returns the contextual keyword the current identifier spells, if
    /// any.
    fn at_contextual(&self) -> Option<SyntaxKind> {
        if !self.at(SyntaxKind::IdentifierToken) {
            return None;
        }
        self.nth_token(0)
            .and_then(|token| SyntaxKind::from_contextual_keyword(token.text))
    }

    fn start(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    /// Consumes the current token. End-of-file is emitted but never
    /// consumed.
    fn bump(&mut self) {
        let kind = self.current();
        self.bump_as(kind);
    }

    /// Consumes the current token, giving it `kind`.
    fn bump_as(&mut self, kind: SyntaxKind) {
        let Some(token) = self.nth_token(0) else {
            self.missing(kind);
            return;
        };
        if token.kind != SyntaxKind::EndOfFileToken {
            self.pos += 1;
        }
        self.builder.token(kind.into(), token.full);
    }

    /// Emits a zero-width token of `kind`.
    fn missing(&mut self, kind: SyntaxKind) {
        self.builder.token(kind.into(), "");
    }

    /// Consumes a token of `kind`, or emits a missing one.
    fn expect(&mut self, kind: SyntaxKind) {
        if self.at(kind) {
            self.bump();
        } else {
            self.missing(kind);
        }
    }

    fn modifiers(&mut self) {
        while self.current().is_modifier() {
            self.bump();
        }
    }

    /// Wraps everything since `checkpoint` and the current token (if any)
    /// in an error node.
    fn error_at(&mut self, checkpoint: Checkpoint) {
        self.start_at(checkpoint, SyntaxKind::Error);
        if !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    /// Enters one nesting level, or returns `false` at the limit.
    const fn enter(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            return false;
        }
        self.depth += 1;
        true
    }

    const fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns whether `extra` more levels would pass the nesting limit.
    const fn nesting_exhausted(&self, extra: usize) -> bool {
        self.depth.saturating_add(extra) >= MAX_NESTING
    }

    /// Wraps the rest of a statement or member in a flat error node: up to
    /// and including a `;` or a balanced `}`, stopping before an unmatched
    /// `}`.
    fn skip_construct(&mut self) {
        self.start(SyntaxKind::Error);
        let mut open = 0_usize;
        loop {
            match self.current() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if open == 0 => break,
                SyntaxKind::SemicolonToken if open == 0 => {
                    self.bump();
                    break;
                }
                kind if is_open_bracket(kind) => open += 1,
                kind if is_close_bracket(kind) => {
                    open = open.saturating_sub(1);
                    if open == 0 && kind == SyntaxKind::CloseBraceToken {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    /// Wraps everything since `checkpoint` and the rest of the expression in
    /// a flat error node, stopping before an unmatched closer, `,` or `;`.
    fn skip_expression(&mut self, checkpoint: Checkpoint) {
        self.start_at(checkpoint, SyntaxKind::Error);
        let mut open = 0_usize;
        loop {
            match self.current() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken | SyntaxKind::SemicolonToken if open == 0 => break,
                kind if is_open_bracket(kind) => open += 1,
                kind if is_close_bracket(kind) => {
                    if open == 0 {
                        break;
                    }
                    open -= 1;
                }
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    fn compilation_unit(&mut self) {
        self.start(SyntaxKind::CompilationUnit);
        while !self.at_eof() {
            self.member();
        }
        self.bump();
        self.finish_node();
    }

    fn identifier_name(&mut self) {
        if self.at(SyntaxKind::IdentifierToken) {
            self.start(SyntaxKind::IdentifierName);
            self.bump();
            self.finish_node();
        } else {
            self.missing_name();
        }
    }

    /// Emits a name holding a missing identifier, used wherever a name or an
    /// expression is required but absent.
    fn missing_name(&mut self) {
        self.start(SyntaxKind::IdentifierName);
        self.missing(SyntaxKind::IdentifierToken);
        self.finish_node();
    }
}

const fn is_open_bracket(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
    )
}

const fn is_close_bracket(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken | SyntaxKind::CloseBraceToken
    )
}
