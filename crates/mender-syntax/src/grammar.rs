//! Node shapes and role assignment.
//!
//! Each node kind has a fixed shape: an ordered list of [`Slot`]s, each
//! naming a [`Role`], the kinds it accepts and how many children it takes.
//! [`assign_roles`] matches a child list against its parent's shape greedily
//! and is run whenever a green node is built, so a tree can never hold a
//! node whose children do not fit its kind.

use std::fmt;

use crate::error::SyntaxError;
use crate::kind::SyntaxKind;

/// Named position of a child within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Role {
    /// A declaration modifier such as `public`.
    Modifier,
    /// The leading keyword of a construct.
    Keyword,
    /// The declared identifier.
    Identifier,
    /// The base type list of a type declaration.
    BaseList,
    /// A base type inside a base list.
    BaseType,
    /// A member of a type or compilation unit.
    Member,
    /// The end-of-file token.
    EndOfFile,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// A declared or referenced type.
    Type,
    /// The explicit interface qualifier of a member.
    ExplicitInterface,
    /// A parameter list.
    ParameterList,
    /// A single parameter.
    Parameter,
    /// A parameter's default value clause.
    Default,
    /// A method, constructor or accessor body.
    Body,
    /// A terminating `;`.
    Semicolon,
    /// The accessor list of a property, indexer or event.
    AccessorList,
    /// A single accessor.
    Accessor,
    /// An initializer clause.
    Initializer,
    /// A variable declaration.
    Declaration,
    /// A (possibly qualified) name.
    Name,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// The value of an initializer or default clause.
    Value,
    /// A statement.
    Statement,
    /// A loop or branch condition.
    Condition,
    /// An initializer expression of a `for` statement.
    ForInitializer,
    /// The `;` after a `for` initializer.
    FirstSemicolon,
    /// The `;` after a `for` condition.
    SecondSemicolon,
    /// An incrementor expression of a `for` statement.
    Incrementor,
    /// The `else` clause of an `if` statement.
    Else,
    /// A sub-expression.
    Expression,
    /// The receiver of a member or element access, or the callee of an
    /// invocation.
    Receiver,
    /// An argument list.
    ArgumentList,
    /// A single argument.
    Argument,
    /// The `name:` prefix of an argument.
    NameColon,
    /// Left operand.
    Left,
    /// Right operand.
    Right,
    /// An operator token.
    Operator,
    /// The operand of a unary expression.
    Operand,
    /// The single token of a literal.
    Token,
    /// A list separator such as `,`.
    Separator,
    /// Anything inside an error node.
    Error,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The set of kinds a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Exactly one kind.
    Kind(SyntaxKind),
    /// Any of the listed kinds.
    AnyOf(&'static [SyntaxKind]),
    /// A declaration modifier token.
    Modifier,
    /// A type node.
    Type,
    /// A name node.
    Name,
    /// An expression node.
    Expression,
    /// A statement node.
    Statement,
    /// A member or nested type declaration.
    Member,
    /// A built-in type keyword.
    PredefinedKeyword,
    /// A literal token.
    Literal,
    /// A binary operator token.
    BinaryOperator,
    /// An assignment operator token.
    AssignmentOperator,
    /// A prefix operator token.
    PrefixOperator,
    /// A postfix operator token.
    PostfixOperator,
    /// Anything at all.
    Any,
}

impl Accept {
    /// Returns whether `kind` is accepted.
    #[must_use]
    pub fn accepts(self, kind: SyntaxKind) -> bool {
        match self {
            Self::Kind(expected) => kind == expected,
            Self::AnyOf(kinds) => kinds.contains(&kind),
            Self::Modifier => kind.is_modifier(),
            Self::Type => kind.is_type(),
            Self::Name => kind.is_name(),
            Self::Expression => kind.is_expression(),
            Self::Statement => kind.is_statement(),
            Self::Member => {
                kind.is_member_declaration()
                    || kind.is_type_declaration()
                    || kind == SyntaxKind::Error
            }
            Self::PredefinedKeyword => kind.is_predefined_type_keyword(),
            Self::Literal => kind.is_literal_token(),
            Self::BinaryOperator => kind.is_binary_operator(),
            Self::AssignmentOperator => kind.is_assignment_operator(),
            Self::PrefixOperator => kind.is_prefix_operator(),
            Self::PostfixOperator => kind.is_postfix_operator(),
            Self::Any => true,
        }
    }
}

/// How many children a slot takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one.
    One,
    /// Zero or one.
    Optional,
    /// Zero or more.
    Many,
    /// Zero or more, separated by the given token kind.
    Separated(SyntaxKind),
}

/// One position in a node kind's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Role given to children placed in this slot.
    pub role: Role,
    /// Kinds the slot accepts.
    pub accept: Accept,
    /// How many children the slot takes.
    pub arity: Arity,
}

const fn one(role: Role, accept: Accept) -> Slot {
    Slot {
        role,
        accept,
        arity: Arity::One,
    }
}

const fn opt(role: Role, accept: Accept) -> Slot {
    Slot {
        role,
        accept,
        arity: Arity::Optional,
    }
}

const fn many(role: Role, accept: Accept) -> Slot {
    Slot {
        role,
        accept,
        arity: Arity::Many,
    }
}

const fn comma_separated(role: Role, accept: Accept) -> Slot {
    Slot {
        role,
        accept,
        arity: Arity::Separated(SyntaxKind::CommaToken),
    }
}

const fn token(role: Role, kind: SyntaxKind) -> Slot {
    one(role, Accept::Kind(kind))
}

const fn node(role: Role, kind: SyntaxKind) -> Slot {
    one(role, Accept::Kind(kind))
}

const MODIFIERS: Slot = many(Role::Modifier, Accept::Modifier);
const IDENTIFIER: Slot = token(Role::Identifier, SyntaxKind::IdentifierToken);
const EXPLICIT_INTERFACE: Slot = opt(
    Role::ExplicitInterface,
    Accept::Kind(SyntaxKind::ExplicitInterfaceSpecifier),
);
const OPTIONAL_BODY: Slot = opt(Role::Body, Accept::Kind(SyntaxKind::Block));
const OPTIONAL_SEMICOLON: Slot = opt(Role::Semicolon, Accept::Kind(SyntaxKind::SemicolonToken));

const TYPE_DECLARATION_TAIL: [Slot; 5] = [
    IDENTIFIER,
    opt(Role::BaseList, Accept::Kind(SyntaxKind::BaseList)),
    token(Role::OpenBrace, SyntaxKind::OpenBraceToken),
    many(Role::Member, Accept::Member),
    token(Role::CloseBrace, SyntaxKind::CloseBraceToken),
];

const fn type_declaration(keyword: SyntaxKind) -> [Slot; 7] {
    let [a, b, c, d, e] = TYPE_DECLARATION_TAIL;
    [MODIFIERS, token(Role::Keyword, keyword), a, b, c, d, e]
}

const CLASS: [Slot; 7] = type_declaration(SyntaxKind::ClassKeyword);
const INTERFACE: [Slot; 7] = type_declaration(SyntaxKind::InterfaceKeyword);
const STRUCT: [Slot; 7] = type_declaration(SyntaxKind::StructKeyword);

const COMPILATION_UNIT: [Slot; 2] = [
    many(Role::Member, Accept::Member),
    token(Role::EndOfFile, SyntaxKind::EndOfFileToken),
];

const BASE_LIST: [Slot; 2] = [
    token(Role::Colon, SyntaxKind::ColonToken),
    comma_separated(Role::BaseType, Accept::Type),
];

const METHOD: [Slot; 7] = [
    MODIFIERS,
    one(Role::Type, Accept::Type),
    EXPLICIT_INTERFACE,
    IDENTIFIER,
    node(Role::ParameterList, SyntaxKind::ParameterList),
    OPTIONAL_BODY,
    OPTIONAL_SEMICOLON,
];

const CONSTRUCTOR: [Slot; 5] = [
    MODIFIERS,
    IDENTIFIER,
    node(Role::ParameterList, SyntaxKind::ParameterList),
    OPTIONAL_BODY,
    OPTIONAL_SEMICOLON,
];

const PROPERTY: [Slot; 7] = [
    MODIFIERS,
    one(Role::Type, Accept::Type),
    EXPLICIT_INTERFACE,
    IDENTIFIER,
    node(Role::AccessorList, SyntaxKind::AccessorList),
    opt(
        Role::Initializer,
        Accept::Kind(SyntaxKind::EqualsValueClause),
    ),
    OPTIONAL_SEMICOLON,
];

const INDEXER: [Slot; 6] = [
    MODIFIERS,
    one(Role::Type, Accept::Type),
    EXPLICIT_INTERFACE,
    token(Role::Keyword, SyntaxKind::ThisKeyword),
    node(Role::ParameterList, SyntaxKind::BracketedParameterList),
    node(Role::AccessorList, SyntaxKind::AccessorList),
];

const EVENT: [Slot; 7] = [
    MODIFIERS,
    token(Role::Keyword, SyntaxKind::EventKeyword),
    one(Role::Type, Accept::Type),
    EXPLICIT_INTERFACE,
    IDENTIFIER,
    opt(Role::AccessorList, Accept::Kind(SyntaxKind::AccessorList)),
    OPTIONAL_SEMICOLON,
];

const FIELD: [Slot; 3] = [
    MODIFIERS,
    node(Role::Declaration, SyntaxKind::VariableDeclaration),
    token(Role::Semicolon, SyntaxKind::SemicolonToken),
];

const EXPLICIT_INTERFACE_SPECIFIER: [Slot; 2] = [
    one(Role::Name, Accept::Name),
    token(Role::Dot, SyntaxKind::DotToken),
];

const PARAMETER_LIST: [Slot; 3] = [
    token(Role::OpenParen, SyntaxKind::OpenParenToken),
    comma_separated(Role::Parameter, Accept::Kind(SyntaxKind::Parameter)),
    token(Role::CloseParen, SyntaxKind::CloseParenToken),
];

const BRACKETED_PARAMETER_LIST: [Slot; 3] = [
    token(Role::OpenBracket, SyntaxKind::OpenBracketToken),
    comma_separated(Role::Parameter, Accept::Kind(SyntaxKind::Parameter)),
    token(Role::CloseBracket, SyntaxKind::CloseBracketToken),
];

const PARAMETER: [Slot; 4] = [
    many(Role::Modifier, Accept::AnyOf(&[SyntaxKind::ParamsKeyword])),
    one(Role::Type, Accept::Type),
    IDENTIFIER,
    opt(Role::Default, Accept::Kind(SyntaxKind::EqualsValueClause)),
];

const EQUALS_VALUE_CLAUSE: [Slot; 2] = [
    token(Role::Equals, SyntaxKind::EqualsToken),
    one(Role::Value, Accept::Expression),
];

const ACCESSOR_LIST: [Slot; 3] = [
    token(Role::OpenBrace, SyntaxKind::OpenBraceToken),
    many(
        Role::Accessor,
        Accept::AnyOf(&[SyntaxKind::AccessorDeclaration, SyntaxKind::Error]),
    ),
    token(Role::CloseBrace, SyntaxKind::CloseBraceToken),
];

const ACCESSOR: [Slot; 4] = [
    MODIFIERS,
    one(
        Role::Keyword,
        Accept::AnyOf(&[
            SyntaxKind::GetKeyword,
            SyntaxKind::SetKeyword,
            SyntaxKind::AddKeyword,
            SyntaxKind::RemoveKeyword,
        ]),
    ),
    OPTIONAL_BODY,
    OPTIONAL_SEMICOLON,
];

const PREDEFINED_TYPE: [Slot; 1] = [one(Role::Keyword, Accept::PredefinedKeyword)];

const IDENTIFIER_NAME: [Slot; 1] = [IDENTIFIER];

const QUALIFIED_NAME: [Slot; 3] = [
    one(Role::Left, Accept::Name),
    token(Role::Dot, SyntaxKind::DotToken),
    node(Role::Right, SyntaxKind::IdentifierName),
];

const BLOCK: [Slot; 3] = [
    token(Role::OpenBrace, SyntaxKind::OpenBraceToken),
    many(Role::Statement, Accept::Statement),
    token(Role::CloseBrace, SyntaxKind::CloseBraceToken),
];

const FOR: [Slot; 10] = [
    token(Role::Keyword, SyntaxKind::ForKeyword),
    token(Role::OpenParen, SyntaxKind::OpenParenToken),
    opt(
        Role::Declaration,
        Accept::Kind(SyntaxKind::VariableDeclaration),
    ),
    comma_separated(Role::ForInitializer, Accept::Expression),
    token(Role::FirstSemicolon, SyntaxKind::SemicolonToken),
    opt(Role::Condition, Accept::Expression),
    token(Role::SecondSemicolon, SyntaxKind::SemicolonToken),
    comma_separated(Role::Incrementor, Accept::Expression),
    token(Role::CloseParen, SyntaxKind::CloseParenToken),
    one(Role::Statement, Accept::Statement),
];

const WHILE: [Slot; 5] = [
    token(Role::Keyword, SyntaxKind::WhileKeyword),
    token(Role::OpenParen, SyntaxKind::OpenParenToken),
    one(Role::Condition, Accept::Expression),
    token(Role::CloseParen, SyntaxKind::CloseParenToken),
    one(Role::Statement, Accept::Statement),
];

const IF: [Slot; 6] = [
    token(Role::Keyword, SyntaxKind::IfKeyword),
    token(Role::OpenParen, SyntaxKind::OpenParenToken),
    one(Role::Condition, Accept::Expression),
    token(Role::CloseParen, SyntaxKind::CloseParenToken),
    one(Role::Statement, Accept::Statement),
    opt(Role::Else, Accept::Kind(SyntaxKind::ElseClause)),
];

const ELSE_CLAUSE: [Slot; 2] = [
    token(Role::Keyword, SyntaxKind::ElseKeyword),
    one(Role::Statement, Accept::Statement),
];

const RETURN: [Slot; 3] = [
    token(Role::Keyword, SyntaxKind::ReturnKeyword),
    opt(Role::Expression, Accept::Expression),
    token(Role::Semicolon, SyntaxKind::SemicolonToken),
];

const EXPRESSION_STATEMENT: [Slot; 2] = [
    one(Role::Expression, Accept::Expression),
    token(Role::Semicolon, SyntaxKind::SemicolonToken),
];

const LOCAL_DECLARATION: [Slot; 2] = [
    node(Role::Declaration, SyntaxKind::VariableDeclaration),
    token(Role::Semicolon, SyntaxKind::SemicolonToken),
];

const VARIABLE_DECLARATION: [Slot; 3] = [
    one(Role::Type, Accept::Type),
    IDENTIFIER,
    opt(
        Role::Initializer,
        Accept::Kind(SyntaxKind::EqualsValueClause),
    ),
];

const EMPTY_STATEMENT: [Slot; 1] = [token(Role::Semicolon, SyntaxKind::SemicolonToken)];

const LITERAL: [Slot; 1] = [one(Role::Token, Accept::Literal)];

const MEMBER_ACCESS: [Slot; 3] = [
    one(Role::Receiver, Accept::Expression),
    token(Role::Dot, SyntaxKind::DotToken),
    node(Role::Name, SyntaxKind::IdentifierName),
];

const INVOCATION: [Slot; 2] = [
    one(Role::Receiver, Accept::Expression),
    node(Role::ArgumentList, SyntaxKind::ArgumentList),
];

const ELEMENT_ACCESS: [Slot; 2] = [
    one(Role::Receiver, Accept::Expression),
    node(Role::ArgumentList, SyntaxKind::BracketedArgumentList),
];

const OBJECT_CREATION: [Slot; 3] = [
    token(Role::Keyword, SyntaxKind::NewKeyword),
    one(Role::Type, Accept::Type),
    opt(Role::ArgumentList, Accept::Kind(SyntaxKind::ArgumentList)),
];

const ARGUMENT_LIST: [Slot; 3] = [
    token(Role::OpenParen, SyntaxKind::OpenParenToken),
    comma_separated(Role::Argument, Accept::Kind(SyntaxKind::Argument)),
    token(Role::CloseParen, SyntaxKind::CloseParenToken),
];

const BRACKETED_ARGUMENT_LIST: [Slot; 3] = [
    token(Role::OpenBracket, SyntaxKind::OpenBracketToken),
    comma_separated(Role::Argument, Accept::Kind(SyntaxKind::Argument)),
    token(Role::CloseBracket, SyntaxKind::CloseBracketToken),
];

const ARGUMENT: [Slot; 2] = [
    opt(Role::NameColon, Accept::Kind(SyntaxKind::NameColon)),
    one(Role::Expression, Accept::Expression),
];

const NAME_COLON: [Slot; 2] = [
    node(Role::Name, SyntaxKind::IdentifierName),
    token(Role::Colon, SyntaxKind::ColonToken),
];

const BINARY: [Slot; 3] = [
    one(Role::Left, Accept::Expression),
    one(Role::Operator, Accept::BinaryOperator),
    one(Role::Right, Accept::Expression),
];

const PREFIX_UNARY: [Slot; 2] = [
    one(Role::Operator, Accept::PrefixOperator),
    one(Role::Operand, Accept::Expression),
];

const POSTFIX_UNARY: [Slot; 2] = [
    one(Role::Operand, Accept::Expression),
    one(Role::Operator, Accept::PostfixOperator),
];

const ASSIGNMENT: [Slot; 3] = [
    one(Role::Left, Accept::Expression),
    one(Role::Operator, Accept::AssignmentOperator),
    one(Role::Right, Accept::Expression),
];

const PARENTHESIZED: [Slot; 3] = [
    token(Role::OpenParen, SyntaxKind::OpenParenToken),
    one(Role::Expression, Accept::Expression),
    token(Role::CloseParen, SyntaxKind::CloseParenToken),
];

const THIS: [Slot; 1] = [token(Role::Keyword, SyntaxKind::ThisKeyword)];

const BASE: [Slot; 1] = [token(Role::Keyword, SyntaxKind::BaseKeyword)];

const ANONYMOUS_METHOD: [Slot; 3] = [
    token(Role::Keyword, SyntaxKind::DelegateKeyword),
    opt(Role::ParameterList, Accept::Kind(SyntaxKind::ParameterList)),
    node(Role::Body, SyntaxKind::Block),
];

const ERROR: [Slot; 1] = [many(Role::Error, Accept::Any)];

/// Returns the shape of a node kind. Token kinds have an empty shape.
#[must_use]
pub fn shape(kind: SyntaxKind) -> &'static [Slot] {
    use SyntaxKind as K;

    match kind {
        K::CompilationUnit => &COMPILATION_UNIT,
        K::ClassDeclaration => &CLASS,
        K::InterfaceDeclaration => &INTERFACE,
        K::StructDeclaration => &STRUCT,
        K::BaseList => &BASE_LIST,
        K::MethodDeclaration => &METHOD,
        K::ConstructorDeclaration => &CONSTRUCTOR,
        K::PropertyDeclaration => &PROPERTY,
        K::IndexerDeclaration => &INDEXER,
        K::EventDeclaration => &EVENT,
        K::FieldDeclaration => &FIELD,
        K::ExplicitInterfaceSpecifier => &EXPLICIT_INTERFACE_SPECIFIER,
        K::ParameterList => &PARAMETER_LIST,
        K::BracketedParameterList => &BRACKETED_PARAMETER_LIST,
        K::Parameter => &PARAMETER,
        K::EqualsValueClause => &EQUALS_VALUE_CLAUSE,
        K::AccessorList => &ACCESSOR_LIST,
        K::AccessorDeclaration => &ACCESSOR,
        K::PredefinedType => &PREDEFINED_TYPE,
        K::IdentifierName => &IDENTIFIER_NAME,
        K::QualifiedName => &QUALIFIED_NAME,
        K::Block => &BLOCK,
        K::ForStatement => &FOR,
        K::WhileStatement => &WHILE,
        K::IfStatement => &IF,
        K::ElseClause => &ELSE_CLAUSE,
        K::ReturnStatement => &RETURN,
        K::ExpressionStatement => &EXPRESSION_STATEMENT,
        K::LocalDeclarationStatement => &LOCAL_DECLARATION,
        K::VariableDeclaration => &VARIABLE_DECLARATION,
        K::EmptyStatement => &EMPTY_STATEMENT,
        K::LiteralExpression => &LITERAL,
        K::MemberAccessExpression => &MEMBER_ACCESS,
        K::InvocationExpression => &INVOCATION,
        K::ElementAccessExpression => &ELEMENT_ACCESS,
        K::ObjectCreationExpression => &OBJECT_CREATION,
        K::ArgumentList => &ARGUMENT_LIST,
        K::BracketedArgumentList => &BRACKETED_ARGUMENT_LIST,
        K::Argument => &ARGUMENT,
        K::NameColon => &NAME_COLON,
        K::BinaryExpression => &BINARY,
        K::PrefixUnaryExpression => &PREFIX_UNARY,
        K::PostfixUnaryExpression => &POSTFIX_UNARY,
        K::AssignmentExpression => &ASSIGNMENT,
        K::ParenthesizedExpression => &PARENTHESIZED,
        K::ThisExpression => &THIS,
        K::BaseExpression => &BASE,
        K::AnonymousMethodExpression => &ANONYMOUS_METHOD,
        K::Error => &ERROR,
        _ => &[],
    }
}

/// Matches `children` against the shape of `kind` and returns the role of
/// each child.
///
/// # Errors
///
/// Returns [`SyntaxError::Malformed`] when `kind` is a token kind, when a
/// required slot is empty, when a separator is not followed by an item, or
/// when children remain after the last slot.
pub fn assign_roles(kind: SyntaxKind, children: &[SyntaxKind]) -> Result<Vec<Role>, SyntaxError> {
    if kind.is_token() {
        return Err(SyntaxError::malformed(kind, "token kinds cannot have children"));
    }

    let accepts_at =
        |accept: Accept, index: usize| children.get(index).is_some_and(|child| accept.accepts(*child));

    let mut roles = Vec::with_capacity(children.len());
    let mut cursor = 0;
    for slot in shape(kind) {
        match slot.arity {
            Arity::One => {
                if !accepts_at(slot.accept, cursor) {
                    return Err(SyntaxError::malformed(
                        kind,
                        format!("expected {} at child {cursor}", slot.role),
                    ));
                }
                roles.push(slot.role);
                cursor += 1;
            }
            Arity::Optional => {
                if accepts_at(slot.accept, cursor) {
                    roles.push(slot.role);
                    cursor += 1;
                }
            }
            Arity::Many => {
                while accepts_at(slot.accept, cursor) {
                    roles.push(slot.role);
                    cursor += 1;
                }
            }
            Arity::Separated(separator) => {
                if !accepts_at(slot.accept, cursor) {
                    continue;
                }
                roles.push(slot.role);
                cursor += 1;
                while children.get(cursor) == Some(&separator) {
                    if !accepts_at(slot.accept, cursor + 1) {
                        return Err(SyntaxError::malformed(
                            kind,
                            format!("{separator} at child {cursor} is not followed by {}", slot.role),
                        ));
                    }
                    roles.push(Role::Separator);
                    roles.push(slot.role);
                    cursor += 2;
                }
            }
        }
    }

    if let Some(extra) = children.get(cursor) {
        return Err(SyntaxError::malformed(
            kind,
            format!("unexpected {extra} at child {cursor}"),
        ));
    }
    Ok(roles)
}
