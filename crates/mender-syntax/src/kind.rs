//! Syntax kinds for tokens and nodes.
//!
//! Token kinds come first in the enum, node kinds follow
//! [`SyntaxKind::CompilationUnit`]. Classification helpers such as
//! [`SyntaxKind::is_expression`] drive the grammar shapes in
//! [`crate::grammar`]. [`MenderLanguage`] binds the kinds to rowan's raw
//! kind numbers.

use std::fmt;

use strum::FromRepr;

/// Every kind of token and node the tree can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr)]
#[repr(u16)]
#[non_exhaustive]
pub enum SyntaxKind {
    // Tokens
    /// End of input. Carries trailing trivia as its leading trivia.
    EndOfFileToken,
    /// An identifier.
    IdentifierToken,
    /// An integer or decimal literal.
    NumericLiteralToken,
    /// A double-quoted string literal.
    StringLiteralToken,
    /// A single-quoted character literal.
    CharacterLiteralToken,
    /// A character the lexer does not recognise.
    BadToken,

    /// `class`
    ClassKeyword,
    /// `interface`
    InterfaceKeyword,
    /// `struct`
    StructKeyword,
    /// `public`
    PublicKeyword,
    /// `private`
    PrivateKeyword,
    /// `protected`
    ProtectedKeyword,
    /// `internal`
    InternalKeyword,
    /// `static`
    StaticKeyword,
    /// `override`
    OverrideKeyword,
    /// `virtual`
    VirtualKeyword,
    /// `abstract`
    AbstractKeyword,
    /// `sealed`
    SealedKeyword,
    /// `readonly`
    ReadOnlyKeyword,
    /// `params`
    ParamsKeyword,
    /// `event`
    EventKeyword,
    /// `this`
    ThisKeyword,
    /// `base`
    BaseKeyword,
    /// `new`
    NewKeyword,
    /// `return`
    ReturnKeyword,
    /// `delegate`
    DelegateKeyword,
    /// `for`
    ForKeyword,
    /// `while`
    WhileKeyword,
    /// `if`
    IfKeyword,
    /// `else`
    ElseKeyword,
    /// `true`
    TrueKeyword,
    /// `false`
    FalseKeyword,
    /// `null`
    NullKeyword,
    /// `void`
    VoidKeyword,
    /// `int`
    IntKeyword,
    /// `long`
    LongKeyword,
    /// `bool`
    BoolKeyword,
    /// `string`
    StringKeyword,
    /// `object`
    ObjectKeyword,
    /// `double`
    DoubleKeyword,
    /// `char`
    CharKeyword,
    /// Contextual `get`.
    GetKeyword,
    /// Contextual `set`.
    SetKeyword,
    /// Contextual `add`.
    AddKeyword,
    /// Contextual `remove`.
    RemoveKeyword,

    /// `{`
    OpenBraceToken,
    /// `}`
    CloseBraceToken,
    /// `(`
    OpenParenToken,
    /// `)`
    CloseParenToken,
    /// `[`
    OpenBracketToken,
    /// `]`
    CloseBracketToken,
    /// `;`
    SemicolonToken,
    /// `,`
    CommaToken,
    /// `.`
    DotToken,
    /// `:`
    ColonToken,
    /// `=`
    EqualsToken,
    /// `==`
    EqualsEqualsToken,
    /// `!=`
    ExclamationEqualsToken,
    /// `!`
    ExclamationToken,
    /// `<`
    LessThanToken,
    /// `<=`
    LessThanEqualsToken,
    /// `>`
    GreaterThanToken,
    /// `>=`
    GreaterThanEqualsToken,
    /// `+`
    PlusToken,
    /// `++`
    PlusPlusToken,
    /// `+=`
    PlusEqualsToken,
    /// `-`
    MinusToken,
    /// `--`
    MinusMinusToken,
    /// `-=`
    MinusEqualsToken,
    /// `*`
    AsteriskToken,
    /// `/`
    SlashToken,
    /// `%`
    PercentToken,
    /// `&&`
    AmpersandAmpersandToken,
    /// `||`
    BarBarToken,

    // Nodes
    /// Root of a parsed source unit.
    CompilationUnit,
    /// `class C : B { ... }`
    ClassDeclaration,
    /// `interface I { ... }`
    InterfaceDeclaration,
    /// `struct S { ... }`
    StructDeclaration,
    /// `: B, I`
    BaseList,
    /// A method declaration.
    MethodDeclaration,
    /// A constructor declaration.
    ConstructorDeclaration,
    /// A property declaration with an accessor list.
    PropertyDeclaration,
    /// An indexer declaration (`this[...]`).
    IndexerDeclaration,
    /// An event declaration.
    EventDeclaration,
    /// A field declaration.
    FieldDeclaration,
    /// The `I.` qualifier of an explicit interface implementation.
    ExplicitInterfaceSpecifier,
    /// `(T a, T b)`
    ParameterList,
    /// `[T a]`
    BracketedParameterList,
    /// A single parameter.
    Parameter,
    /// `= value`
    EqualsValueClause,
    /// `{ get; set; }`
    AccessorList,
    /// `get;` or `set { ... }`
    AccessorDeclaration,
    /// A keyword type such as `int`.
    PredefinedType,
    /// A simple name.
    IdentifierName,
    /// `A.B`
    QualifiedName,
    /// `{ statements }`
    Block,
    /// `for (init; condition; incrementors) statement`
    ForStatement,
    /// `while (condition) statement`
    WhileStatement,
    /// `if (condition) statement else statement`
    IfStatement,
    /// `else statement`
    ElseClause,
    /// `return expression;`
    ReturnStatement,
    /// `expression;`
    ExpressionStatement,
    /// `T name = value;`
    LocalDeclarationStatement,
    /// `T name = value` without the terminator.
    VariableDeclaration,
    /// `;`
    EmptyStatement,
    /// A literal such as `true`, `5` or `"text"`.
    LiteralExpression,
    /// `receiver.Name`
    MemberAccessExpression,
    /// `callee(arguments)`
    InvocationExpression,
    /// `receiver[arguments]`
    ElementAccessExpression,
    /// `new T(arguments)`
    ObjectCreationExpression,
    /// `(arguments)`
    ArgumentList,
    /// `[arguments]`
    BracketedArgumentList,
    /// A single argument, optionally named.
    Argument,
    /// `name:`
    NameColon,
    /// `left op right`
    BinaryExpression,
    /// `op operand`
    PrefixUnaryExpression,
    /// `operand op`
    PostfixUnaryExpression,
    /// `left = right`
    AssignmentExpression,
    /// `(expression)`
    ParenthesizedExpression,
    /// `this`
    ThisExpression,
    /// `base`
    BaseExpression,
    /// `delegate (T a) { ... }`
    AnonymousMethodExpression,
    /// Tokens the parser could not place.
    Error,
}

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("class", SyntaxKind::ClassKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("struct", SyntaxKind::StructKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("internal", SyntaxKind::InternalKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("override", SyntaxKind::OverrideKeyword),
    ("virtual", SyntaxKind::VirtualKeyword),
    ("abstract", SyntaxKind::AbstractKeyword),
    ("sealed", SyntaxKind::SealedKeyword),
    ("readonly", SyntaxKind::ReadOnlyKeyword),
    ("params", SyntaxKind::ParamsKeyword),
    ("event", SyntaxKind::EventKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("base", SyntaxKind::BaseKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("delegate", SyntaxKind::DelegateKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("int", SyntaxKind::IntKeyword),
    ("long", SyntaxKind::LongKeyword),
    ("bool", SyntaxKind::BoolKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("double", SyntaxKind::DoubleKeyword),
    ("char", SyntaxKind::CharKeyword),
];

const CONTEXTUAL_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("get", SyntaxKind::GetKeyword),
    ("set", SyntaxKind::SetKeyword),
    ("add", SyntaxKind::AddKeyword),
    ("remove", SyntaxKind::RemoveKeyword),
];

const PUNCTUATION: &[(&str, SyntaxKind)] = &[
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    ("[", SyntaxKind::OpenBracketToken),
    ("]", SyntaxKind::CloseBracketToken),
    (";", SyntaxKind::SemicolonToken),
    (",", SyntaxKind::CommaToken),
    (".", SyntaxKind::DotToken),
    (":", SyntaxKind::ColonToken),
    ("=", SyntaxKind::EqualsToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("!", SyntaxKind::ExclamationToken),
    ("<", SyntaxKind::LessThanToken),
    ("<=", SyntaxKind::LessThanEqualsToken),
    (">", SyntaxKind::GreaterThanToken),
    (">=", SyntaxKind::GreaterThanEqualsToken),
    ("+", SyntaxKind::PlusToken),
    ("++", SyntaxKind::PlusPlusToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-", SyntaxKind::MinusToken),
    ("--", SyntaxKind::MinusMinusToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("*", SyntaxKind::AsteriskToken),
    ("/", SyntaxKind::SlashToken),
    ("%", SyntaxKind::PercentToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
];

impl SyntaxKind {
    /// Returns whether this kind is a token rather than a node.
    #[must_use]
    pub const fn is_token(self) -> bool {
        (self as u16) < (Self::CompilationUnit as u16)
    }

    /// Returns whether this kind is a node.
    #[must_use]
    pub const fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns whether this kind is a reserved or contextual keyword.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        let value = self as u16;
        value >= Self::ClassKeyword as u16 && value <= Self::RemoveKeyword as u16
    }

    /// Maps reserved keyword text to its kind.
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<Self> {
        lookup(KEYWORDS, text)
    }

    /// Maps contextual keyword text (`get`, `set`, `add`, `remove`) to its
    /// kind.
    #[must_use]
    pub fn from_contextual_keyword(text: &str) -> Option<Self> {
        lookup(CONTEXTUAL_KEYWORDS, text)
    }

    /// Maps punctuation text to its kind.
    #[must_use]
    pub fn from_punctuation(text: &str) -> Option<Self> {
        lookup(PUNCTUATION, text)
    }

    /// Returns the fixed source text of keyword and punctuation tokens.
    #[must_use]
    pub fn fixed_text(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .chain(CONTEXTUAL_KEYWORDS)
            .chain(PUNCTUATION)
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    /// Returns whether this token is a declaration modifier.
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PublicKeyword
                | Self::PrivateKeyword
                | Self::ProtectedKeyword
                | Self::InternalKeyword
                | Self::StaticKeyword
                | Self::OverrideKeyword
                | Self::VirtualKeyword
                | Self::AbstractKeyword
                | Self::SealedKeyword
                | Self::ReadOnlyKeyword
        )
    }

    /// Returns whether this token names a built-in type.
    #[must_use]
    pub const fn is_predefined_type_keyword(self) -> bool {
        matches!(
            self,
            Self::VoidKeyword
                | Self::IntKeyword
                | Self::LongKeyword
                | Self::BoolKeyword
                | Self::StringKeyword
                | Self::ObjectKeyword
                | Self::DoubleKeyword
                | Self::CharKeyword
        )
    }

    /// Returns whether this token starts a literal expression.
    #[must_use]
    pub const fn is_literal_token(self) -> bool {
        matches!(
            self,
            Self::NumericLiteralToken
                | Self::StringLiteralToken
                | Self::CharacterLiteralToken
                | Self::TrueKeyword
                | Self::FalseKeyword
                | Self::NullKeyword
        )
    }

    /// Returns whether this token is a binary operator.
    #[must_use]
    pub const fn is_binary_operator(self) -> bool {
        self.binary_precedence() > 0
    }

    /// Returns the binding power of a binary operator, or zero.
    #[must_use]
    pub const fn binary_precedence(self) -> u8 {
        match self {
            Self::BarBarToken => 1,
            Self::AmpersandAmpersandToken => 2,
            Self::EqualsEqualsToken | Self::ExclamationEqualsToken => 3,
            Self::LessThanToken
            | Self::LessThanEqualsToken
            | Self::GreaterThanToken
            | Self::GreaterThanEqualsToken => 4,
            Self::PlusToken | Self::MinusToken => 5,
            Self::AsteriskToken | Self::SlashToken | Self::PercentToken => 6,
            _ => 0,
        }
    }

    /// Returns whether this token is an assignment operator.
    #[must_use]
    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            Self::EqualsToken | Self::PlusEqualsToken | Self::MinusEqualsToken
        )
    }

    /// Returns whether this token is a prefix unary operator.
    #[must_use]
    pub const fn is_prefix_operator(self) -> bool {
        matches!(
            self,
            Self::ExclamationToken | Self::MinusToken | Self::PlusPlusToken | Self::MinusMinusToken
        )
    }

    /// Returns whether this token is a postfix unary operator.
    #[must_use]
    pub const fn is_postfix_operator(self) -> bool {
        matches!(self, Self::PlusPlusToken | Self::MinusMinusToken)
    }

    /// Returns whether this node kind can stand in expression position.
    #[must_use]
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            Self::LiteralExpression
                | Self::IdentifierName
                | Self::PredefinedType
                | Self::MemberAccessExpression
                | Self::InvocationExpression
                | Self::ElementAccessExpression
                | Self::ObjectCreationExpression
                | Self::BinaryExpression
                | Self::PrefixUnaryExpression
                | Self::PostfixUnaryExpression
                | Self::AssignmentExpression
                | Self::ParenthesizedExpression
                | Self::ThisExpression
                | Self::BaseExpression
                | Self::AnonymousMethodExpression
                | Self::Error
        )
    }

    /// Returns whether this node kind can stand in type position.
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            Self::PredefinedType | Self::IdentifierName | Self::QualifiedName | Self::Error
        )
    }

    /// Returns whether this node kind is a (possibly qualified) name.
    #[must_use]
    pub const fn is_name(self) -> bool {
        matches!(self, Self::IdentifierName | Self::QualifiedName)
    }

    /// Returns whether this node kind is a statement.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::ForStatement
                | Self::WhileStatement
                | Self::IfStatement
                | Self::ReturnStatement
                | Self::ExpressionStatement
                | Self::LocalDeclarationStatement
                | Self::EmptyStatement
                | Self::Error
        )
    }

    /// Returns whether this node kind declares a type.
    #[must_use]
    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration | Self::InterfaceDeclaration | Self::StructDeclaration
        )
    }

    /// Returns whether this node kind declares a type member.
    #[must_use]
    pub const fn is_member_declaration(self) -> bool {
        matches!(
            self,
            Self::MethodDeclaration
                | Self::ConstructorDeclaration
                | Self::PropertyDeclaration
                | Self::IndexerDeclaration
                | Self::EventDeclaration
                | Self::FieldDeclaration
        )
    }
}

/// The rowan language tag for trees of [`SyntaxKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MenderLanguage {}

impl rowan::Language for MenderLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::from_repr(raw.0).unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn lookup(table: &[(&str, SyntaxKind)], text: &str) -> Option<SyntaxKind> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == text)
        .map(|(_, kind)| *kind)
}
