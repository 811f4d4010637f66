//! Error types for the engine, actions and the registry.

use mender_core::OperationCancelled;
use mender_syntax::{Span, SyntaxError, SyntaxKind};

/// Errors returned by [`RuleEngine::query`](crate::RuleEngine::query) and
/// [`RuleEngine::scan`](crate::RuleEngine::scan).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The caller raised the cancellation token.
    #[error(transparent)]
    Cancelled(#[from] OperationCancelled),
    /// A rule built a node that does not fit its shape.
    #[error("grammar invariant violated: {source}")]
    Invariant {
        /// Underlying syntax error.
        #[from]
        source: SyntaxError,
    },
}

impl EngineError {
    /// Returns whether the operation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Errors returned by [`Action::apply`](crate::Action::apply).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ApplyError {
    /// The tree is not the one the action was computed against.
    #[error("action from rule '{rule_id}' is stale for this tree")]
    Stale {
        /// Rule that produced the action.
        rule_id: String,
    },
    /// The target recorded by the action is not in the tree.
    #[error("no {kind} at {span}")]
    TargetNotFound {
        /// Kind of the missing target.
        kind: SyntaxKind,
        /// Span of the missing target.
        span: Span,
    },
    /// The edit produced a node that does not fit its shape.
    #[error("edit produced a malformed tree: {source}")]
    Malformed {
        /// Underlying syntax error.
        #[from]
        source: SyntaxError,
    },
}

impl ApplyError {
    /// Creates a [`ApplyError::Stale`] error.
    #[must_use]
    pub fn stale(rule_id: impl Into<String>) -> Self {
        Self::Stale {
            rule_id: rule_id.into(),
        }
    }

    /// Creates a [`ApplyError::TargetNotFound`] error.
    #[must_use]
    pub const fn target_not_found(kind: SyntaxKind, span: Span) -> Self {
        Self::TargetNotFound { kind, span }
    }
}

/// Errors raised while building a [`RuleRegistry`](crate::RuleRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Two rules share one id.
    #[error("rule '{id}' is already registered")]
    DuplicateRule {
        /// The repeated id.
        id: String,
    },
}

/// Several interface members could supply a parameter default, so none is
/// compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{candidates} interface members could supply parameter defaults")]
pub struct AmbiguousBaseDefault {
    /// Number of interface members found.
    pub candidates: usize,
}
