//! Names positional arguments after the parameters they bind to.

use mender_core::{Category, Severity, SymbolKind};
use mender_syntax::{GreenElement, Replacement, Role, SyntaxError, SyntaxKind, SyntaxNode, make};

use super::arguments;
use crate::error::EngineError;
use crate::rule::{Finding, Fix, Rule, RuleContext, RuleDescriptor, RuleMode};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor::new(
    "add-argument-name",
    "Add argument name",
    Category::Refactorings,
    Severity::Hint,
    RuleMode::Refactoring,
);

/// Turns `Draw(1, 2)` into `Draw(x: 1, y: 2)` starting at the argument
/// under the caret.
///
/// Every positional argument from the caret onwards is named, so the call
/// stays valid: a positional argument may not follow a named one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddArgumentName;

impl Rule for AddArgumentName {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn interest(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Argument]
    }

    fn boundary(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ArgumentList, SyntaxKind::BracketedArgumentList]
    }

    fn check(&self, cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError> {
        let at_argument_start = cx
            .span()
            .is_some_and(|span| span.start() == node.span().start());
        if !at_argument_start || is_named(node) {
            return Ok(Vec::new());
        }
        let Some(list) = node.parent() else {
            return Ok(Vec::new());
        };
        let Some(call) = list.parent().filter(|call| {
            matches!(
                call.kind(),
                SyntaxKind::InvocationExpression
                    | SyntaxKind::ElementAccessExpression
                    | SyntaxKind::ObjectCreationExpression
            )
        }) else {
            return Ok(Vec::new());
        };

        let Some((_, callee)) = cx.resolve(&call)? else {
            return Ok(Vec::new());
        };
        let parameters = callee.parameters();
        let callable = matches!(
            callee.kind(),
            SymbolKind::Method | SymbolKind::Constructor | SymbolKind::Indexer
        );
        let ends_with_params = parameters.last().is_some_and(|last| last.is_params());
        if !callable || parameters.is_empty() || ends_with_params {
            return Ok(Vec::new());
        }

        let siblings = arguments(&list);
        let Some(start) = siblings.iter().position(|argument| argument == node) else {
            return Ok(Vec::new());
        };
        let names: Vec<String> = siblings
            .iter()
            .zip(parameters)
            .skip(start)
            .take_while(|(argument, _)| !is_named(argument))
            .map(|(_, parameter)| parameter.name().to_owned())
            .collect();
        let Some(first) = names.first() else {
            return Ok(Vec::new());
        };

        let title = format!("Add argument name '{first}'");
        let fix = Fix::new(title, &list, move |target| name_arguments(target, start, &names));
        Ok(vec![Finding::refactoring(fix)])
    }
}

fn is_named(argument: &SyntaxNode) -> bool {
    argument.node_by_role(Role::NameColon).is_some()
}

/// Prefixes the arguments of `list` from `start` onwards with `names`,
/// giving each name the argument's leading trivia.
fn name_arguments(
    list: &SyntaxNode,
    start: usize,
    names: &[String],
) -> Result<Replacement, SyntaxError> {
    let green = list.green();
    let mut ordinal = 0_usize;
    let mut children = Vec::with_capacity(green.child_count());
    for (child, role) in green.children().into_iter().zip(green.roles()) {
        if role != Role::Argument {
            children.push(child);
            continue;
        }
        let name = ordinal.checked_sub(start).and_then(|offset| names.get(offset));
        ordinal += 1;
        let (Some(name), Some(argument)) = (name, child.as_node()) else {
            children.push(child.clone());
            continue;
        };
        let mut named: Vec<GreenElement> = vec![make::name_colon(name, argument.leading_trivia())?.into()];
        for part in argument.children() {
            named.push(part.with_leading_trivia(" ")?);
        }
        children.push(make::node(SyntaxKind::Argument, named)?.into());
    }
    Ok(make::node(green.kind(), children)?.into())
}
