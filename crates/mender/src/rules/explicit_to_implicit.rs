//! Converts an explicit interface member into a public implicit one.

use mender_core::{Category, Severity, Symbol, SymbolKind, SymbolRef};
use mender_syntax::{
    GreenElement, Replacement, Role, SyntaxError, SyntaxKind, SyntaxNode, make,
};
use tracing::trace;

use crate::error::EngineError;
use crate::rule::{Finding, Fix, Rule, RuleContext, RuleDescriptor, RuleMode};
use crate::telemetry::RULES_TARGET;

const DESCRIPTOR: RuleDescriptor = RuleDescriptor::new(
    "explicit-to-implicit-interface-impl",
    "Convert explicit to implicit implementation",
    Category::Refactorings,
    Severity::Hint,
    RuleMode::Refactoring,
);

/// Offers `public void Run()` in place of `void IRunner.Run()`.
///
/// The offer is withheld when the containing type already declares a
/// member the converted one would collide with.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitToImplicitInterfaceImpl;

impl Rule for ExplicitToImplicitInterfaceImpl {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn interest(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::MethodDeclaration,
            SyntaxKind::PropertyDeclaration,
            SyntaxKind::IndexerDeclaration,
            SyntaxKind::EventDeclaration,
        ]
    }

    fn check(&self, cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError> {
        let Some(specifier) = node.node_by_role(Role::ExplicitInterface) else {
            return Ok(Vec::new());
        };
        if !cx.span().is_some_and(|span| specifier.span().contains(span)) {
            return Ok(Vec::new());
        }
        let Some((member_ref, member)) = cx.resolve(node)? else {
            return Ok(Vec::new());
        };
        if let Some(existing) = conflicting_member(cx, member_ref, member) {
            trace!(
                target: RULES_TARGET,
                rule = DESCRIPTOR.id(),
                member = member.name(),
                existing = existing.name(),
                "implicit member would collide"
            );
            return Ok(Vec::new());
        }

        Ok(vec![Finding::refactoring(Fix::new(
            DESCRIPTOR.title(),
            node,
            make_implicit,
        ))])
    }
}

/// Returns a sibling of the same kind that already has the name and
/// signature the converted member would take.
fn conflicting_member<'a>(
    cx: &RuleContext<'a>,
    member_ref: SymbolRef,
    member: &Symbol,
) -> Option<&'a Symbol> {
    let owner = cx.symbol(member.containing_type()?)?;
    let implemented: Vec<&Symbol> = member
        .explicit_implementations()
        .iter()
        .filter_map(|handle| cx.symbol(*handle))
        .collect();
    owner
        .members()
        .iter()
        .filter(|handle| **handle != member_ref)
        .filter_map(|handle| cx.symbol(*handle))
        .filter(|other| other.kind() == member.kind())
        .find(|other| {
            implemented.iter().any(|target| {
                target.name() == other.name()
                    && (member.kind() == SymbolKind::Event || member.has_same_signature(other))
            })
        })
}

/// Drops the interface qualifier and every modifier, then prefixes the
/// member with `public`, keeping the member's original leading trivia.
fn make_implicit(node: &SyntaxNode) -> Result<Replacement, SyntaxError> {
    let green = node.green();
    let originals = green.children();
    let mut kept: Vec<GreenElement> = Vec::with_capacity(originals.len());
    let mut carried: Option<&str> = None;
    for (child, role) in originals.iter().zip(green.roles()) {
        match role {
            Role::Modifier => continue,
            Role::ExplicitInterface => {
                carried = Some(child.leading_trivia());
                continue;
            }
            _ => {}
        }
        let moved = match carried.take() {
            Some(trivia) if child.leading_trivia().is_empty() => child.with_leading_trivia(trivia)?,
            _ => child.clone(),
        };
        kept.push(moved);
    }

    let stripped = make::node(green.kind(), kept)?.with_leading_trivia(" ")?;
    let mut children: Vec<GreenElement> =
        vec![make::token(SyntaxKind::PublicKeyword, green.leading_trivia())?.into()];
    children.extend(stripped.children());
    Ok(make::node(green.kind(), children)?.into())
}
