//! Symbol data exposed by a semantic model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{SymbolRef, TypeRef};

/// What a symbol declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SymbolKind {
    /// A class, struct or interface.
    Type,
    /// A method.
    Method,
    /// A constructor.
    Constructor,
    /// A property.
    Property,
    /// An indexer.
    Indexer,
    /// An event.
    Event,
    /// A field.
    Field,
    /// A parameter.
    Parameter,
    /// A local variable.
    Local,
}

/// Flavour of a type symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// A class.
    Class,
    /// A struct.
    Struct,
    /// An interface.
    Interface,
    /// A delegate; its signature is the `Invoke` method member.
    Delegate,
}

/// A compile-time constant, such as a parameter default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantValue {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A character.
    Char(char),
    /// A string.
    String(String),
}

impl ConstantValue {
    /// Renders the value as a source literal.
    ///
    /// ```
    /// use mender_core::ConstantValue;
    ///
    /// assert_eq!(ConstantValue::String(String::from("a\"b")).to_literal(), r#""a\"b""#);
    /// assert_eq!(ConstantValue::Int(-5).to_literal(), "-5");
    /// ```
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            Self::Null => String::from("null"),
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Char(value) => format!("'{}'", escape(&value.to_string(), '\'')),
            Self::String(value) => format!("\"{}\"", escape(value, '"')),
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// One parameter of a method, constructor or indexer symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSymbol {
    name: String,
    ty: Option<TypeRef>,
    default: Option<ConstantValue>,
    is_params: bool,
}

impl ParameterSymbol {
    /// Creates a required parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Option<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            is_params: false,
        }
    }

    /// Makes the parameter optional with the given default.
    #[must_use]
    pub fn with_default(mut self, value: ConstantValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the parameter as a `params` array.
    #[must_use]
    pub const fn params(mut self) -> Self {
        self.is_params = true;
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter type, when known.
    #[must_use]
    pub const fn ty(&self) -> Option<TypeRef> {
        self.ty
    }

    /// Returns the default value of an optional parameter.
    #[must_use]
    pub const fn default_value(&self) -> Option<&ConstantValue> {
        self.default.as_ref()
    }

    /// Returns whether the parameter has a default value.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// Returns whether this is a `params` parameter.
    #[must_use]
    pub const fn is_params(&self) -> bool {
        self.is_params
    }
}

/// Data for one declared entity.
///
/// Built with the `with_*` methods:
///
/// ```
/// use mender_core::{ParameterSymbol, Symbol, SymbolKind};
///
/// let method = Symbol::new(SymbolKind::Method, "Run")
///     .with_parameters(vec![ParameterSymbol::new("count", None)])
///     .overriding();
/// assert!(method.is_override());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    kind: SymbolKind,
    name: String,
    namespace: Option<String>,
    type_kind: Option<TypeKind>,
    containing_type: Option<SymbolRef>,
    is_static: bool,
    is_override: bool,
    parameters: Vec<ParameterSymbol>,
    return_type: Option<TypeRef>,
    overridden: Option<SymbolRef>,
    base_members: Vec<SymbolRef>,
    explicit_implementations: Vec<SymbolRef>,
    members: Vec<SymbolRef>,
}

impl Symbol {
    /// Creates a symbol with no relations.
    #[must_use]
    pub fn new(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: None,
            type_kind: None,
            containing_type: None,
            is_static: false,
            is_override: false,
            parameters: Vec::new(),
            return_type: None,
            overridden: None,
            base_members: Vec::new(),
            explicit_implementations: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Creates a type symbol.
    #[must_use]
    pub fn new_type(type_kind: TypeKind, name: impl Into<String>) -> Self {
        let mut symbol = Self::new(SymbolKind::Type, name);
        symbol.type_kind = Some(type_kind);
        symbol
    }

    /// Sets the namespace of a top-level type.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the declaring type.
    #[must_use]
    pub const fn in_type(mut self, containing_type: SymbolRef) -> Self {
        self.containing_type = Some(containing_type);
        self
    }

    /// Marks the symbol static.
    #[must_use]
    pub const fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Marks the symbol as an `override`.
    #[must_use]
    pub const fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }

    /// Sets the parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterSymbol>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the return type of a method. Methods without one return
    /// nothing.
    #[must_use]
    pub const fn with_return_type(mut self, return_type: TypeRef) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Sets the member this one directly overrides.
    #[must_use]
    pub const fn with_overridden(mut self, overridden: SymbolRef) -> Self {
        self.overridden = Some(overridden);
        self
    }

    /// Sets the base members: overridden members from nearest to furthest,
    /// then implemented interface members.
    #[must_use]
    pub fn with_base_members(mut self, base_members: Vec<SymbolRef>) -> Self {
        self.base_members = base_members;
        self
    }

    /// Sets the interface members implemented explicitly.
    #[must_use]
    pub fn with_explicit_implementations(mut self, members: Vec<SymbolRef>) -> Self {
        self.explicit_implementations = members;
        self
    }

    /// Returns the kind.
    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns the simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace of a top-level type.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the flavour of a type symbol.
    #[must_use]
    pub const fn type_kind(&self) -> Option<TypeKind> {
        self.type_kind
    }

    /// Returns the declaring type.
    #[must_use]
    pub const fn containing_type(&self) -> Option<SymbolRef> {
        self.containing_type
    }

    /// Returns whether the symbol is static.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns whether the symbol is an `override`.
    #[must_use]
    pub const fn is_override(&self) -> bool {
        self.is_override
    }

    /// Returns the parameters.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterSymbol] {
        &self.parameters
    }

    /// Returns the return type; `None` for `void` methods and for symbols
    /// that return nothing.
    #[must_use]
    pub const fn return_type(&self) -> Option<TypeRef> {
        self.return_type
    }

    /// Returns whether the symbol is a delegate type.
    #[must_use]
    pub const fn is_delegate(&self) -> bool {
        matches!(self.type_kind, Some(TypeKind::Delegate))
    }

    /// Returns the member this one directly overrides.
    #[must_use]
    pub const fn overridden(&self) -> Option<SymbolRef> {
        self.overridden
    }

    /// Returns the base members in lookup order.
    #[must_use]
    pub fn base_members(&self) -> &[SymbolRef] {
        &self.base_members
    }

    /// Returns the interface members implemented explicitly.
    #[must_use]
    pub fn explicit_implementations(&self) -> &[SymbolRef] {
        &self.explicit_implementations
    }

    /// Returns the members of a type symbol in declaration order.
    #[must_use]
    pub fn members(&self) -> &[SymbolRef] {
        &self.members
    }

    /// Returns whether the parameter types match `other`'s position by
    /// position.
    #[must_use]
    pub fn has_same_signature(&self, other: &Self) -> bool {
        self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(left, right)| left.ty() == right.ty())
    }

    pub(super) fn push_member(&mut self, member: SymbolRef) {
        self.members.push(member);
    }
}
