//! Flags overriding or implementing methods whose parameter defaults
//! disagree with the base declaration.
//!
//! Callers see the default of the static type they call through, so a
//! mismatch makes the same call behave differently depending on the
//! receiver's declared type. Three shapes are reported per parameter:
//!
//! - the member declares a default the base lacks (fix: remove it)
//! - both declare defaults with different values (fix: use the base value)
//! - the base declares a default the member lacks (fix: copy it)

use mender_core::{Category, ConstantValue, Severity, Symbol, SymbolRef, TypeKind};
use mender_syntax::{Replacement, Role, SyntaxError, SyntaxKind, SyntaxNode, make};
use tracing::trace;

use super::role_index;
use crate::error::{AmbiguousBaseDefault, EngineError};
use crate::rule::{Finding, Fix, Rule, RuleContext, RuleDescriptor, RuleMode};
use crate::telemetry::RULES_TARGET;

const DESCRIPTOR: RuleDescriptor = RuleDescriptor::new(
    "optional-parameter-mismatch",
    "Optional parameter value differs from base method",
    Category::CodeQuality,
    Severity::Warning,
    RuleMode::Analyzer,
);

/// Compares parameter defaults against the base member.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalParameterMismatch;

impl Rule for OptionalParameterMismatch {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn interest(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MethodDeclaration]
    }

    fn check(&self, cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError> {
        let Some((_, method)) = cx.resolve(node)? else {
            return Ok(Vec::new());
        };
        let (base_ref, base) = match base_member(cx, method) {
            Ok(Some(found)) => found,
            Ok(None) => return Ok(Vec::new()),
            Err(ambiguous) => {
                trace!(
                    target: RULES_TARGET,
                    rule = DESCRIPTOR.id(),
                    span = %node.span(),
                    candidates = ambiguous.candidates,
                    "skipping method: {ambiguous}"
                );
                return Ok(Vec::new());
            }
        };

        let parameter_nodes = node
            .node_by_role(Role::ParameterList)
            .map(|list| list.nodes_by_role(Role::Parameter))
            .unwrap_or_default();

        let mut findings = Vec::new();
        for ((own, parameter), inherited) in method
            .parameters()
            .iter()
            .zip(&parameter_nodes)
            .zip(base.parameters())
        {
            let finding = match (own.default_value(), inherited.default_value()) {
                (Some(_), None) => Some(
                    Finding::new(parameter.span(), differs_message(cx, own.name(), base))
                        .with_fix(Fix::new(
                            "Remove parameter default value",
                            parameter,
                            remove_default,
                        )),
                ),
                (Some(value), Some(expected)) if value != expected => Some(
                    Finding::new(parameter.span(), differs_message(cx, own.name(), base))
                        .with_fix(change_default(parameter, expected)),
                ),
                (None, Some(expected)) => Some(
                    Finding::new(
                        parameter.span(),
                        format!(
                            "Parameter {} has default value in base method '{}'",
                            own.name(),
                            full_name(cx, base_ref, base)
                        ),
                    )
                    .with_fix(add_default(parameter, expected)),
                ),
                _ => None,
            };
            findings.extend(finding);
        }
        Ok(findings)
    }
}

/// Picks the member whose defaults callers see through the base type: the
/// original class declaration when there is one, else the single interface
/// member being implemented.
fn base_member<'a>(
    cx: &RuleContext<'a>,
    method: &Symbol,
) -> Result<Option<(SymbolRef, &'a Symbol)>, AmbiguousBaseDefault> {
    let mut interface_members = Vec::new();
    for &handle in method.base_members() {
        let Some(candidate) = cx.symbol(handle) else {
            continue;
        };
        let in_interface = candidate
            .containing_type()
            .and_then(|owner| cx.symbol(owner))
            .and_then(Symbol::type_kind)
            == Some(TypeKind::Interface);
        if in_interface {
            interface_members.push((handle, candidate));
        } else if !candidate.is_override() {
            return Ok(Some((handle, candidate)));
        }
    }
    match interface_members.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        several => Err(AmbiguousBaseDefault {
            candidates: several.len(),
        }),
    }
}

fn differs_message(cx: &RuleContext<'_>, parameter: &str, base: &Symbol) -> String {
    let owner = base
        .containing_type()
        .and_then(|owner| cx.model().full_name(owner))
        .unwrap_or_default();
    format!("Optional parameter value {parameter} differs from base method '{owner}'")
}

fn full_name(cx: &RuleContext<'_>, handle: SymbolRef, symbol: &Symbol) -> String {
    cx.model()
        .full_name(handle)
        .unwrap_or_else(|| symbol.name().to_owned())
}

fn remove_default(parameter: &SyntaxNode) -> Result<Replacement, SyntaxError> {
    let green = parameter.green();
    let index = role_index(&green, Role::Default)?;
    Ok(green.splice_children(index..index + 1, Vec::new())?.into())
}

fn change_default(parameter: &SyntaxNode, expected: &ConstantValue) -> Fix {
    let literal = expected.to_literal();
    Fix::new(
        format!("Change default value to {literal}"),
        parameter,
        move |target| {
            let green = target.green();
            let index = role_index(&green, Role::Default)?;
            let clause = make::equals_value_clause(&make::expression(&literal)?)?;
            Ok(green.replace_child(index, clause)?.into())
        },
    )
}

fn add_default(parameter: &SyntaxNode, expected: &ConstantValue) -> Fix {
    let literal = expected.to_literal();
    Fix::new(
        format!("Add default value from base '{literal}'"),
        parameter,
        move |target| {
            let green = target.green();
            let end = green.child_count();
            let clause = make::equals_value_clause(&make::expression(&literal)?)?;
            Ok(green.splice_children(end..end, vec![clause.into()])?.into())
        },
    )
}
