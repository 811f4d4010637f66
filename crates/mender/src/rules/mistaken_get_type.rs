//! Flags `GetType()` called on a value that is already a `System.Type`.

use mender_core::{Category, Severity};
use mender_syntax::{Role, SyntaxKind, SyntaxNode};
use tracing::trace;

use super::arguments;
use crate::error::EngineError;
use crate::rule::{Finding, Rule, RuleContext, RuleDescriptor, RuleMode};
use crate::telemetry::RULES_TARGET;

const DESCRIPTOR: RuleDescriptor = RuleDescriptor::new(
    "mistaken-type-introspection-call",
    "Possible mistaken call to 'object.GetType()'",
    Category::PracticesAndImprovements,
    Severity::Warning,
    RuleMode::Analyzer,
);

/// Reports `t.GetType()` where `t` is a `System.Type`, which yields
/// `System.RuntimeType` rather than the type `t` describes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MistakenTypeIntrospectionCall;

impl Rule for MistakenTypeIntrospectionCall {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn interest(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::InvocationExpression]
    }

    fn check(&self, cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError> {
        let Some(access) = node
            .node_by_role(Role::Receiver)
            .filter(|receiver| receiver.kind() == SyntaxKind::MemberAccessExpression)
        else {
            return Ok(Vec::new());
        };
        let calls_get_type = access
            .node_by_role(Role::Name)
            .is_some_and(|name| name.text() == "GetType");
        if !calls_get_type || !arguments(node).is_empty() {
            return Ok(Vec::new());
        }

        let Some((_, symbol)) = cx.resolve(&access)? else {
            trace!(
                target: RULES_TARGET,
                rule = DESCRIPTOR.id(),
                span = %access.span(),
                "GetType call did not resolve"
            );
            return Ok(Vec::new());
        };
        if symbol.is_static() {
            return Ok(Vec::new());
        }
        let on_system_type = symbol
            .containing_type()
            .and_then(|owner| cx.symbol(owner))
            .is_some_and(|owner| owner.name() == "Type" && owner.namespace() == Some("System"));
        if !on_system_type {
            return Ok(Vec::new());
        }

        Ok(vec![Finding::new(node.span(), DESCRIPTOR.title())])
    }
}
