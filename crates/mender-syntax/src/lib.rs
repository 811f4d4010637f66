//! Immutable syntax trees for the Mender rewrite engine.
//!
//! This crate provides the tree layer every rule works against:
//!
//! - **Kinds and shapes** via [`SyntaxKind`] and [`grammar`]: each node kind
//!   declares the roles, arities and accepted kinds of its children, and a
//!   node that does not fit cannot be built
//! - **Trees** via [`SyntaxTree`]: position-free [`GreenNode`]s backed by
//!   rowan green trees, walked with [`SyntaxNode`] cursors that add offsets
//!   and parent links
//! - **Persistent replacement** via [`SyntaxTree::replace`]: one structural
//!   substitution rebuilds the spine to the root and shares every other
//!   subtree with the original
//! - **A reference parser** via [`Parser`] for a small C#-like language,
//!   total and error-tolerant, lexing with `logos` and nesting no deeper
//!   than [`MAX_NESTING`]
//!
//! # Example
//!
//! ```
//! use mender_syntax::{Parser, Replacement, SyntaxKind};
//!
//! let mut parser = Parser::new();
//! let tree = parser.parse("class C { void M() { for (; true; i++) { } } }")?;
//!
//! let condition = tree
//!     .root()
//!     .descendants()
//!     .find(|node| node.kind() == SyntaxKind::LiteralExpression)
//!     .expect("literal");
//! assert_eq!(condition.text(), "true");
//!
//! let edited = tree.replace(&condition, Replacement::remove())?;
//! assert_eq!(edited.text(), "class C { void M() { for (;; i++) { } } }");
//! assert_eq!(tree.text(), "class C { void M() { for (; true; i++) { } } }");
//! # Ok::<(), mender_syntax::SyntaxError>(())
//! ```

mod error;
pub mod grammar;
mod green;
mod kind;
pub mod make;
mod parser;
mod position;
mod red;
mod span;
mod tree;

pub use error::SyntaxError;
pub use grammar::Role;
pub use green::{GreenElement, GreenNode, GreenToken};
pub use kind::{MenderLanguage, SyntaxKind};
pub use parser::{MAX_NESTING, Parser};
pub use position::{LineCol, LineIndex};
pub use red::{SyntaxElement, SyntaxNode, SyntaxToken};
pub use span::Span;
pub use tree::{Replacement, SyntaxIssue, SyntaxTree};

#[cfg(test)]
mod tests;
