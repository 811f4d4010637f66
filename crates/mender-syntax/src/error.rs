//! Error types for tree construction and rewriting.
//!
//! Every fallible operation in `mender-syntax` reports a [`SyntaxError`].
//! Parsing itself is total: malformed source produces error nodes, never an
//! error value.

use thiserror::Error;

use crate::kind::SyntaxKind;
use crate::span::Span;

/// Errors from tree construction and rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// A node's children do not fit the shape its kind requires.
    #[error("malformed {kind}: {message}")]
    Malformed {
        /// The kind of the node being built.
        kind: SyntaxKind,
        /// Description of the violation.
        message: String,
    },

    /// A node from another tree was passed where one from this tree was
    /// expected.
    #[error("node at {span} does not belong to this tree")]
    ForeignNode {
        /// Span of the offending node.
        span: Span,
    },

    /// A child index or span lies outside its container.
    #[error("{span} is out of range for length {len}")]
    OutOfRange {
        /// The requested range.
        span: Span,
        /// Length of the container.
        len: usize,
    },

    /// A source fragment handed to a factory did not parse cleanly.
    #[error("invalid {kind} fragment: {message}")]
    InvalidFragment {
        /// The kind the fragment was expected to produce.
        kind: SyntaxKind,
        /// Description of the failure.
        message: String,
    },

    /// Internal error indicating a bug.
    #[error("internal error: {message}")]
    InternalError {
        /// Description of the internal error.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a grammar violation error.
    #[must_use]
    pub fn malformed(kind: SyntaxKind, message: impl Into<String>) -> Self {
        Self::Malformed {
            kind,
            message: message.into(),
        }
    }

    /// Creates a foreign node error.
    #[must_use]
    pub const fn foreign_node(span: Span) -> Self {
        Self::ForeignNode { span }
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub const fn out_of_range(span: Span, len: usize) -> Self {
        Self::OutOfRange { span, len }
    }

    /// Creates an invalid fragment error.
    #[must_use]
    pub fn invalid_fragment(kind: SyntaxKind, message: impl Into<String>) -> Self {
        Self::InvalidFragment {
            kind,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns whether this error reports a grammar violation.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
