//! Introduces an auto-property for a constructor parameter and assigns it.

use mender_core::{Category, Severity};
use mender_syntax::{
    GreenElement, GreenNode, Replacement, Role, SyntaxError, SyntaxKind, SyntaxNode, make,
};

use super::role_index;
use crate::error::EngineError;
use crate::rule::{Finding, Fix, Rule, RuleContext, RuleDescriptor, RuleMode};

const DESCRIPTOR: RuleDescriptor = RuleDescriptor::new(
    "initialize-auto-property-from-parameter",
    "Initialize auto-property from parameter",
    Category::Refactorings,
    Severity::Hint,
    RuleMode::Refactoring,
);

const INDENT_UNIT: &str = "    ";

/// With the caret on a constructor parameter name, declares
/// `public T Name { get; set; }` before the constructor and assigns the
/// parameter to it as the first statement of the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitializeAutoPropertyFromParameter;

impl Rule for InitializeAutoPropertyFromParameter {
    fn descriptor(&self) -> &RuleDescriptor {
        &DESCRIPTOR
    }

    fn interest(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Parameter]
    }

    fn check(&self, cx: &RuleContext<'_>, node: &SyntaxNode) -> Result<Vec<Finding>, EngineError> {
        let Some(caret) = cx.span().filter(|span| span.is_empty()) else {
            return Ok(Vec::new());
        };
        let on_parameter = cx
            .tree()
            .root()
            .token_at_offset(caret.start())
            .is_some_and(|token| token.parent().as_ref() == Some(node));
        if !on_parameter {
            return Ok(Vec::new());
        }
        let Some(plan) = PropertyPlan::for_parameter(node) else {
            return Ok(Vec::new());
        };
        let Some(owner) = plan.constructor.parent() else {
            return Ok(Vec::new());
        };

        let edit = plan.into_edit();
        let fix = Fix::new(DESCRIPTOR.title(), &owner, move |target| edit.apply(target));
        Ok(vec![
            Finding::new(node.span(), DESCRIPTOR.title()).with_fix(fix),
        ])
    }
}

struct PropertyPlan {
    constructor: SyntaxNode,
    type_text: String,
    parameter: String,
    property: String,
    statement_indent: String,
}

impl PropertyPlan {
    fn for_parameter(parameter: &SyntaxNode) -> Option<Self> {
        let constructor = parameter
            .parent()?
            .parent()
            .filter(|parent| parent.kind() == SyntaxKind::ConstructorDeclaration)?;
        let body = constructor.node_by_role(Role::Body)?;
        let type_text = parameter.node_by_role(Role::Type)?.text();
        let name = parameter.token_by_role(Role::Identifier)?.text().to_owned();

        let member_indent = constructor.leading_trivia();
        let statement_indent = match body.nodes_by_role(Role::Statement).first() {
            Some(first) => first.leading_trivia(),
            None if member_indent.contains('\n') => format!("{member_indent}{INDENT_UNIT}"),
            None => String::from(" "),
        };

        Some(Self {
            property: capitalise(&name),
            constructor,
            type_text,
            parameter: name,
            statement_indent,
        })
    }

    fn into_edit(self) -> PropertyEdit {
        let assignee = if self.property == self.parameter {
            format!("this.{}", self.property)
        } else {
            self.property.clone()
        };
        PropertyEdit {
            constructor_index: self.constructor.index(),
            member: format!(
                "{}public {} {} {{ get; set; }}",
                self.constructor.leading_trivia(),
                self.type_text,
                self.property
            ),
            statement: format!(
                "{}{assignee} = {};",
                self.statement_indent, self.parameter
            ),
        }
    }
}

/// The deferred half of the refactoring: everything it needs is captured
/// as text and child positions so it can run against a fresh tree.
struct PropertyEdit {
    constructor_index: usize,
    member: String,
    statement: String,
}

impl PropertyEdit {
    fn apply(&self, owner: &SyntaxNode) -> Result<Replacement, SyntaxError> {
        let green = owner.green();
        let constructor = child_node(&green, self.constructor_index)
            .filter(|child| child.kind() == SyntaxKind::ConstructorDeclaration)
            .ok_or_else(|| SyntaxError::malformed(green.kind(), "constructor moved"))?;
        let body_index = role_index(&constructor, Role::Body)?;
        let body = child_node(&constructor, body_index)
            .ok_or_else(|| SyntaxError::malformed(constructor.kind(), "constructor has no body"))?;

        let assigned = body.splice_children(1..1, vec![make::statement(&self.statement)?.into()])?;
        let rebuilt = constructor.replace_child(body_index, assigned)?;
        let property = make::member(&self.member)?;
        let index = self.constructor_index;
        Ok(green
            .splice_children(index..index + 1, vec![property.into(), rebuilt.into()])?
            .into())
    }
}

fn child_node(parent: &GreenNode, index: usize) -> Option<GreenNode> {
    match parent.child(index)? {
        GreenElement::Node(node) => Some(node),
        GreenElement::Token(_) => None,
    }
}

fn capitalise(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
