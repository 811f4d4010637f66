//! The rule contract.
//!
//! A rule pairs a pure matcher with deferred edit builders. The engine hands
//! it one node at a time together with a [`RuleContext`]; the rule answers
//! with zero or more [`Finding`]s, each optionally carrying a [`Fix`] whose
//! edit runs only when the host applies the resulting action.

use std::fmt;
use std::sync::Arc;

use mender_core::{
    CancellationToken, Category, OperationCancelled, SemanticModel, Severity, Symbol, SymbolRef,
};
use mender_syntax::{Replacement, Span, SyntaxError, SyntaxKind, SyntaxNode, SyntaxTree};

use crate::error::EngineError;

/// Deferred edit: receives the target node located in the tree being edited
/// and returns what replaces it.
pub type EditFn = dyn Fn(&SyntaxNode) -> Result<Replacement, SyntaxError> + Send + Sync;

/// Whether a rule reports diagnostics or offers refactorings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    /// Takes part in scans; its fixes are offered by queries whose span
    /// intersects the finding.
    Analyzer,
    /// Takes part in queries only.
    Refactoring,
}

/// Static metadata describing a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    id: &'static str,
    title: &'static str,
    category: Category,
    severity: Severity,
    mode: RuleMode,
}

impl RuleDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(
        id: &'static str,
        title: &'static str,
        category: Category,
        severity: Severity,
        mode: RuleMode,
    ) -> Self {
        Self {
            id,
            title,
            category,
            severity,
            mode,
        }
    }

    /// Returns the stable id.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the title, also used as the default diagnostic message.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Returns the category tag.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the default severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the mode.
    #[must_use]
    pub const fn mode(&self) -> RuleMode {
        self.mode
    }
}

/// Everything a rule may consult while checking a node.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    tree: &'a SyntaxTree,
    model: &'a dyn SemanticModel,
    cancel: &'a CancellationToken,
    span: Option<Span>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context. `span` is the requested span for queries and
    /// `None` for scans.
    #[must_use]
    pub fn new(
        tree: &'a SyntaxTree,
        model: &'a dyn SemanticModel,
        cancel: &'a CancellationToken,
        span: Option<Span>,
    ) -> Self {
        Self {
            tree,
            model,
            cancel,
            span,
        }
    }

    /// Returns the tree being checked.
    #[must_use]
    pub const fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// Returns the semantic model paired with the tree.
    #[must_use]
    pub const fn model(&self) -> &'a dyn SemanticModel {
        self.model
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn cancel(&self) -> &'a CancellationToken {
        self.cancel
    }

    /// Returns the requested span of a query.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        self.span
    }

    /// Resolves `node` and reads its symbol.
    ///
    /// # Errors
    ///
    /// Returns [`OperationCancelled`] when the token has been raised.
    pub fn resolve(
        &self,
        node: &SyntaxNode,
    ) -> Result<Option<(SymbolRef, &'a Symbol)>, OperationCancelled> {
        self.model.resolve_symbol(node, self.cancel)
    }

    /// Reads the symbol behind a handle.
    #[must_use]
    pub fn symbol(&self, symbol: SymbolRef) -> Option<&'a Symbol> {
        self.model.symbol(symbol)
    }
}

impl fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("tree_len", &self.tree.len())
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}

/// A named, deferred edit anchored at one node.
#[derive(Clone)]
pub struct Fix {
    title: String,
    target: Span,
    kind: SyntaxKind,
    edit: Arc<EditFn>,
}

impl Fix {
    /// Creates a fix that rewrites `target` with `edit`.
    pub fn new(
        title: impl Into<String>,
        target: &SyntaxNode,
        edit: impl Fn(&SyntaxNode) -> Result<Replacement, SyntaxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            target: target.span(),
            kind: target.kind(),
            edit: Arc::new(edit),
        }
    }

    /// Returns the title shown to the user.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the span of the target node.
    #[must_use]
    pub const fn target(&self) -> Span {
        self.target
    }

    /// Returns the kind of the target node.
    #[must_use]
    pub const fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub(crate) fn into_parts(self) -> (String, Span, SyntaxKind, Arc<EditFn>) {
        (self.title, self.target, self.kind, self.edit)
    }
}

impl fmt::Debug for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fix")
            .field("title", &self.title)
            .field("target", &self.target)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// One match of a rule.
#[derive(Debug, Clone)]
pub struct Finding {
    span: Span,
    message: String,
    fix: Option<Fix>,
}

impl Finding {
    /// Creates a finding without a fix.
    #[must_use]
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            fix: None,
        }
    }

    /// Creates a finding for a refactoring, anchored at the fix target and
    /// titled after it.
    #[must_use]
    pub fn refactoring(fix: Fix) -> Self {
        Self {
            span: fix.target(),
            message: fix.title().to_owned(),
            fix: Some(fix),
        }
    }

    /// Attaches a fix.
    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Returns the span the finding is anchored at.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the fix, if any.
    #[must_use]
    pub const fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    /// Consumes the finding, returning its fix.
    #[must_use]
    pub fn into_fix(self) -> Option<Fix> {
        self.fix
    }
}

/// A registered pattern matcher.
///
/// Implementations must be pure: the same node, model and span always give
/// the same findings, and checking never mutates anything.
pub trait Rule: Send + Sync {
    /// Returns the rule's metadata.
    fn descriptor(&self) -> &RuleDescriptor;

    /// Returns the node kinds the rule wants to see.
    fn interest(&self) -> &'static [SyntaxKind];

    /// Returns the node kinds after which a query stops offering this rule
    /// further ancestors.
    fn boundary(&self) -> &'static [SyntaxKind] {
        &[]
    }

    /// Checks one node. An empty vector means no match.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] when a resolution observes
    /// cancellation, and [`EngineError::Invariant`] when building a finding
    /// breaks a grammar invariant.
    fn check(&self, cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError>;
}
