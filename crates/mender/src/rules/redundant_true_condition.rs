//! Flags `true` used as a `for` loop condition.

use mender_core::{Category, Severity};
use mender_syntax::{Replacement, Role, SyntaxError, SyntaxKind, SyntaxNode};

use super::role_index;
use crate::error::EngineError;
use crate::rule::{Finding, Fix, Rule, RuleContext, RuleDescriptor, RuleMode};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor::new(
    "redundant-true-loop-condition",
    "'true' is redundant as for statement condition",
    Category::RedundanciesInCode,
    Severity::Warning,
    RuleMode::Analyzer,
);

/// Reports `for (init; true; step)` and offers to drop the condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedundantTrueLoopCondition;

impl Rule for RedundantTrueLoopCondition {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn interest(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ForStatement]
    }

    fn check(&self, _cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError> {
        let Some(condition) = node.node_by_role(Role::Condition) else {
            return Ok(Vec::new());
        };
        let is_true_literal = condition.kind() == SyntaxKind::LiteralExpression
            && condition
                .token_by_role(Role::Token)
                .is_some_and(|token| token.kind() == SyntaxKind::TrueKeyword);
        if !is_true_literal {
            return Ok(Vec::new());
        }

        let fix = Fix::new("Remove 'true'", node, remove_condition);
        Ok(vec![
            Finding::new(condition.span(), DESCRIPTOR.title()).with_fix(fix),
        ])
    }
}

/// Removes the condition, prepending its trivia to the second `;` so that
/// `for (; true; i++)` becomes `for (; ; i++)` and comments survive.
fn remove_condition(node: &SyntaxNode) -> Result<Replacement, SyntaxError> {
    let green = node.green();
    let condition = role_index(&green, Role::Condition)?;
    let semicolon = role_index(&green, Role::SecondSemicolon)?;
    let trivia = green
        .child(condition)
        .map(|child| child.leading_trivia().to_owned())
        .unwrap_or_default();

    let with_trivia = match green.child(semicolon) {
        Some(token) if !trivia.is_empty() => {
            let joined = format!("{trivia}{}", token.leading_trivia());
            green.replace_child(semicolon, token.with_leading_trivia(&joined)?)?
        }
        _ => green,
    };
    let edited = with_trivia.splice_children(condition..condition + 1, Vec::new())?;
    Ok(edited.into())
}
