//! Expands a method group into an anonymous method with the delegate's
//! signature.

use mender_core::{Category, Severity, Symbol, TypeRef};
use mender_syntax::{Replacement, SyntaxError, SyntaxKind, SyntaxNode, make};
use tracing::trace;

use crate::error::EngineError;
use crate::rule::{Finding, Fix, Rule, RuleContext, RuleDescriptor, RuleMode};
use crate::telemetry::RULES_TARGET;

const DESCRIPTOR: RuleDescriptor = RuleDescriptor::new(
    "method-group-to-anonymous-method",
    "To anonymous method",
    Category::Refactorings,
    Severity::Hint,
    RuleMode::Refactoring,
);

/// Offers `delegate (int value) { return Parse(value); }` in place of the
/// method group `Parse` wherever the expression is converted to a delegate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodGroupToAnonymousMethod;

impl Rule for MethodGroupToAnonymousMethod {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn interest(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::IdentifierName]
    }

    fn check(&self, cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError> {
        if !cx.span().is_some_and(|span| span.is_empty()) {
            return Ok(Vec::new());
        }
        let target = match node.parent() {
            Some(parent) if parent.kind() == SyntaxKind::MemberAccessExpression => parent,
            _ => node.clone(),
        };

        let Some(delegate) = delegate_type(cx, &target)? else {
            return Ok(Vec::new());
        };
        let Some(invoke) = delegate
            .members()
            .iter()
            .filter_map(|handle| cx.symbol(*handle))
            .find(|member| member.name() == "Invoke")
        else {
            trace!(
                target: RULES_TARGET,
                rule = DESCRIPTOR.id(),
                delegate = delegate.name(),
                "delegate has no Invoke member"
            );
            return Ok(Vec::new());
        };
        let Some(shape) = DelegateShape::of(cx, invoke) else {
            trace!(
                target: RULES_TARGET,
                rule = DESCRIPTOR.id(),
                delegate = delegate.name(),
                "parameter type unknown"
            );
            return Ok(Vec::new());
        };

        Ok(vec![Finding::refactoring(Fix::new(
            DESCRIPTOR.title(),
            &target,
            move |fresh| shape.expand(fresh),
        ))])
    }
}

/// Returns the delegate type `target` is converted to, falling back to its
/// own type.
fn delegate_type<'a>(
    cx: &RuleContext<'a>,
    target: &SyntaxNode,
) -> Result<Option<&'a Symbol>, EngineError> {
    let model = cx.model();
    let context = target.parent().unwrap_or_else(|| target.clone());
    let converted = model
        .infer_types(&context, target.span().start(), cx.cancel())?
        .first()
        .copied();
    let resolved: Option<TypeRef> = match converted {
        Some(ty) => Some(ty),
        None => model.type_of(target, cx.cancel())?,
    };
    Ok(resolved
        .and_then(|ty| cx.symbol(ty.symbol()))
        .filter(|symbol| symbol.is_delegate()))
}

/// The pieces of the anonymous method that come from the delegate.
struct DelegateShape {
    parameters: Option<String>,
    arguments: String,
    returns_value: bool,
}

impl DelegateShape {
    fn of(cx: &RuleContext<'_>, invoke: &Symbol) -> Option<Self> {
        let mut declared = Vec::with_capacity(invoke.parameters().len());
        let mut names = Vec::with_capacity(invoke.parameters().len());
        for parameter in invoke.parameters() {
            let ty = cx.symbol(parameter.ty()?.symbol())?;
            declared.push(format!("{} {}", ty.name(), parameter.name()));
            names.push(parameter.name());
        }
        Some(Self {
            parameters: (!declared.is_empty()).then(|| format!("({}) ", declared.join(", "))),
            arguments: names.join(", "),
            returns_value: invoke.return_type().is_some(),
        })
    }

    fn expand(&self, target: &SyntaxNode) -> Result<Replacement, SyntaxError> {
        let call = format!("{}({})", target.text(), self.arguments);
        let body = if self.returns_value {
            format!("return {call};")
        } else {
            format!("{call};")
        };
        let text = format!(
            "delegate {}{{ {body} }}",
            self.parameters.as_deref().unwrap_or_default()
        );
        Ok(make::expression(&text)?
            .with_leading_trivia(&target.leading_trivia())?
            .into())
    }
}
