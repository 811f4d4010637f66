//! Factory helpers for building replacement subtrees.
//!
//! Small pieces are assembled token by token; larger ones are parsed from
//! source fragments, which keeps their shape in step with the parser.

use crate::error::SyntaxError;
use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::kind::SyntaxKind;
use crate::parser::Parser;
use crate::parser::lexer::tokenize;
use crate::red::SyntaxNode;

/// Creates a keyword or punctuation token with its fixed text.
///
/// # Errors
///
/// Returns [`SyntaxError::Malformed`] when `kind` has no fixed text.
pub fn token(kind: SyntaxKind, leading_trivia: &str) -> Result<GreenToken, SyntaxError> {
    let text = kind
        .fixed_text()
        .ok_or_else(|| SyntaxError::malformed(kind, "kind has no fixed text"))?;
    GreenToken::new(kind, leading_trivia, text)
}

/// Creates an identifier token.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidFragment`] when `name` is not a plain
/// identifier.
pub fn identifier(name: &str, leading_trivia: &str) -> Result<GreenToken, SyntaxError> {
    let valid = matches!(
        tokenize(name).as_slice(),
        [only, end]
            if only.kind == SyntaxKind::IdentifierToken
                && only.full == name
                && end.full.is_empty()
    );
    if !valid {
        return Err(SyntaxError::invalid_fragment(
            SyntaxKind::IdentifierToken,
            format!("'{name}' is not an identifier"),
        ));
    }
    GreenToken::new(SyntaxKind::IdentifierToken, leading_trivia, name)
}

/// Creates a simple name expression.
///
/// # Errors
///
/// As for [`identifier`].
pub fn identifier_name(name: &str, leading_trivia: &str) -> Result<GreenNode, SyntaxError> {
    GreenNode::new(
        SyntaxKind::IdentifierName,
        vec![identifier(name, leading_trivia)?.into()],
    )
}

/// Creates a `name:` argument prefix. The trivia goes before the name.
///
/// # Errors
///
/// As for [`identifier`].
pub fn name_colon(name: &str, leading_trivia: &str) -> Result<GreenNode, SyntaxError> {
    GreenNode::new(
        SyntaxKind::NameColon,
        vec![
            identifier_name(name, leading_trivia)?.into(),
            token(SyntaxKind::ColonToken, "")?.into(),
        ],
    )
}

/// Creates ` = value`, moving `value` one space after the `=`.
///
/// # Errors
///
/// Returns [`SyntaxError::Malformed`] when `value` is not an expression.
pub fn equals_value_clause(value: &GreenNode) -> Result<GreenNode, SyntaxError> {
    GreenNode::new(
        SyntaxKind::EqualsValueClause,
        vec![
            token(SyntaxKind::EqualsToken, " ")?.into(),
            value.with_leading_trivia(" ")?.into(),
        ],
    )
}

/// Creates a node, checking its shape.
///
/// # Errors
///
/// Returns [`SyntaxError::Malformed`] when the children do not fit.
pub fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> Result<GreenNode, SyntaxError> {
    GreenNode::new(kind, children)
}

/// Parses an expression fragment such as `"5"` or `"a.b(c)"`. The result
/// has no leading trivia.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidFragment`] when the text does not parse as
/// a single error-free expression.
pub fn expression(text: &str) -> Result<GreenNode, SyntaxError> {
    let statement = parse_fragment(
        &format!("class __Fragment {{ void __Fragment() {{ {text}; }} }}"),
        SyntaxKind::ExpressionStatement,
    )?;
    let expression = statement
        .children()
        .next()
        .ok_or_else(|| SyntaxError::invalid_fragment(SyntaxKind::ExpressionStatement, text))?;
    expression.green().with_leading_trivia("")
}

/// Parses a statement fragment. Leading whitespace in `text` becomes the
/// statement's leading trivia.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidFragment`] when the text does not parse as
/// a single error-free statement.
pub fn statement(text: &str) -> Result<GreenNode, SyntaxError> {
    let body = parse_fragment(
        &format!("class __Fragment {{ void __Fragment() {{{text}}} }}"),
        SyntaxKind::Block,
    )?;
    single_child(&body, SyntaxKind::Block, text)
}

/// Parses a member fragment. Leading whitespace in `text` becomes the
/// member's leading trivia.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidFragment`] when the text does not parse as
/// a single error-free member.
pub fn member(text: &str) -> Result<GreenNode, SyntaxError> {
    let class = parse_fragment(
        &format!("class __Fragment {{{text}}}"),
        SyntaxKind::ClassDeclaration,
    )?;
    single_child(&class, SyntaxKind::ClassDeclaration, text)
}

fn parse_fragment(source: &str, container: SyntaxKind) -> Result<SyntaxNode, SyntaxError> {
    let tree = Parser::new().parse(source)?;
    if let Some(issue) = tree.errors().first() {
        return Err(SyntaxError::invalid_fragment(
            container,
            format!("{} in '{source}'", issue.message()),
        ));
    }
    tree.root()
        .descendants()
        .find(|node| node.kind() == container)
        .ok_or_else(|| SyntaxError::invalid_fragment(container, format!("no {container} in '{source}'")))
}

fn single_child(container: &SyntaxNode, kind: SyntaxKind, text: &str) -> Result<GreenNode, SyntaxError> {
    let children: Vec<SyntaxNode> = container.children().collect();
    match children.as_slice() {
        [only] => Ok(only.green()),
        _ => Err(SyntaxError::invalid_fragment(
            kind,
            format!("expected exactly one item in '{text}'"),
        )),
    }
}
