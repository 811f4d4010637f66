//! Actions: lazily computed edits offered by a query.

use std::fmt;
use std::sync::Arc;

use mender_syntax::{GreenNode, Span, SyntaxKind, SyntaxTree};
use tracing::debug;

use crate::error::ApplyError;
use crate::rule::{EditFn, Fix};
use crate::telemetry::ACTION_TARGET;

/// A named edit computed against one tree snapshot.
///
/// The edit itself runs only in [`Action::apply`]. Actions are created fresh
/// by every query and hold the root they were computed against, so applying
/// one to any other tree is refused.
#[derive(Clone)]
pub struct Action {
    rule_id: &'static str,
    title: String,
    target: Span,
    kind: SyntaxKind,
    root: GreenNode,
    edit: Arc<EditFn>,
}

impl Action {
    pub(crate) fn new(rule_id: &'static str, fix: Fix, tree: &SyntaxTree) -> Self {
        let (title, target, kind, edit) = fix.into_parts();
        Self {
            rule_id,
            title,
            target,
            kind,
            root: tree.green().clone(),
            edit,
        }
    }

    /// Returns the id of the rule that offered this action.
    #[must_use]
    pub const fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    /// Returns the title shown to the user.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the span of the node the edit replaces.
    #[must_use]
    pub const fn target(&self) -> Span {
        self.target
    }

    /// Returns the kind of the node the edit replaces.
    #[must_use]
    pub const fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Returns whether `tree` is the snapshot this action was computed
    /// against, by identity or by structure.
    #[must_use]
    pub fn is_current(&self, tree: &SyntaxTree) -> bool {
        tree.green().ptr_eq(&self.root) || *tree.green() == self.root
    }

    /// Applies the edit, returning a new tree. `tree` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Stale`] when `tree` is not the snapshot the
    /// action was computed against, [`ApplyError::TargetNotFound`] when the
    /// recorded target cannot be located, and [`ApplyError::Malformed`] when
    /// the edit breaks a grammar invariant.
    pub fn apply(&self, tree: &SyntaxTree) -> Result<SyntaxTree, ApplyError> {
        if !self.is_current(tree) {
            debug!(
                target: ACTION_TARGET,
                rule = self.rule_id,
                "refusing stale action"
            );
            return Err(ApplyError::stale(self.rule_id));
        }
        let node = tree
            .find_node(self.target, self.kind)
            .ok_or_else(|| ApplyError::target_not_found(self.kind, self.target))?;
        let replacement = (self.edit)(&node)?;
        let edited = tree.replace(&node, replacement)?;
        debug!(
            target: ACTION_TARGET,
            rule = self.rule_id,
            title = %self.title,
            target_span = %self.target,
            old_len = tree.len(),
            new_len = edited.len(),
            "applied action"
        );
        Ok(edited)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("rule_id", &self.rule_id)
            .field("title", &self.title)
            .field("target", &self.target)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
