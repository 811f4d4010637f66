//! Flags `base` calls from an override that silently fall back to the base
//! member's parameter defaults.

use mender_core::{Category, Severity};
use mender_syntax::{Role, SyntaxKind, SyntaxNode};

use super::arguments;
use crate::error::EngineError;
use crate::rule::{Finding, Rule, RuleContext, RuleDescriptor, RuleMode};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor::new(
    "base-call-with-implicit-defaults",
    "Call to base member with implicit default parameters",
    Category::CodeQuality,
    Severity::Warning,
    RuleMode::Analyzer,
);

/// Reports `base.M(a)` inside an override of `M(a, b = 1)`, and the
/// indexer equivalent `base[a]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseCallWithImplicitDefaults;

impl Rule for BaseCallWithImplicitDefaults {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn interest(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::InvocationExpression,
            SyntaxKind::ElementAccessExpression,
        ]
    }

    fn check(&self, cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError> {
        let Some(enclosing) = base_receiver_scope(node) else {
            return Ok(Vec::new());
        };
        let Some((callee_ref, callee)) = cx.resolve(node)? else {
            return Ok(Vec::new());
        };
        let Some((_, declaration)) = cx.resolve(&enclosing)? else {
            return Ok(Vec::new());
        };
        if declaration.overridden() != Some(callee_ref) {
            return Ok(Vec::new());
        }

        let parameters = callee.parameters();
        let relies_on_default = arguments(node).len() < parameters.len()
            && parameters.last().is_some_and(|last| last.is_optional());
        if !relies_on_default {
            return Ok(Vec::new());
        }
        Ok(vec![Finding::new(node.span(), DESCRIPTOR.title())])
    }
}

/// Returns the declaration a `base` access must sit in: the enclosing
/// method for `base.M(...)` and the enclosing indexer for `base[...]`.
fn base_receiver_scope(node: &SyntaxNode) -> Option<SyntaxNode> {
    let receiver = node.node_by_role(Role::Receiver)?;
    match node.kind() {
        SyntaxKind::InvocationExpression => {
            let on_base = receiver.kind() == SyntaxKind::MemberAccessExpression
                && receiver
                    .node_by_role(Role::Receiver)
                    .is_some_and(|inner| inner.kind() == SyntaxKind::BaseExpression);
            if on_base {
                node.ancestor_of_kind(SyntaxKind::MethodDeclaration)
            } else {
                None
            }
        }
        SyntaxKind::ElementAccessExpression if receiver.kind() == SyntaxKind::BaseExpression => {
            node.ancestor_of_kind(SyntaxKind::IndexerDeclaration)
        }
        _ => None,
    }
}
