//! An in-memory semantic model.

use std::collections::HashMap;

use mender_syntax::{Span, SyntaxKind, SyntaxNode};

use super::{SemanticModel, Symbol, SymbolRef, TypeRef};
use crate::cancel::{CancellationToken, OperationCancelled};

type NodeKey = (SyntaxKind, Span);

/// A [`SemanticModel`] whose answers were recorded up front.
///
/// Nodes are bound by kind and span, so a table describes exactly one tree
/// snapshot.
///
/// # Example
///
/// ```
/// use mender_core::{CancellationToken, SemanticModel, Symbol, SymbolKind, SymbolTable};
/// use mender_syntax::{Parser, SyntaxKind};
///
/// let tree = Parser::new().parse("class C { void M() { } }")?;
/// let method = tree
///     .root()
///     .descendants()
///     .find(|node| node.kind() == SyntaxKind::MethodDeclaration)
///     .expect("method");
///
/// let mut builder = SymbolTable::builder();
/// let symbol = builder.add(Symbol::new(SymbolKind::Method, "M"));
/// builder.bind(&method, symbol);
/// let table = builder.build();
///
/// let resolved = table.resolve(&method, &CancellationToken::new())?;
/// assert_eq!(resolved, Some(symbol));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    bindings: HashMap<NodeKey, SymbolRef>,
    types: HashMap<NodeKey, TypeRef>,
    expected: HashMap<usize, Vec<TypeRef>>,
}

impl SymbolTable {
    /// Starts an empty table.
    #[must_use]
    pub fn builder() -> SymbolTableBuilder {
        SymbolTableBuilder::default()
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns whether the table holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SemanticModel for SymbolTable {
    fn resolve(
        &self,
        node: &SyntaxNode,
        cancel: &CancellationToken,
    ) -> Result<Option<SymbolRef>, OperationCancelled> {
        cancel.check()?;
        Ok(self.bindings.get(&(node.kind(), node.span())).copied())
    }

    fn type_of(
        &self,
        node: &SyntaxNode,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeRef>, OperationCancelled> {
        cancel.check()?;
        Ok(self.types.get(&(node.kind(), node.span())).copied())
    }

    fn infer_types(
        &self,
        context: &SyntaxNode,
        position: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<TypeRef>, OperationCancelled> {
        cancel.check()?;
        if !context.full_span().contains_offset(position) {
            return Ok(Vec::new());
        }
        Ok(self.expected.get(&position).cloned().unwrap_or_default())
    }

    fn symbol(&self, symbol: SymbolRef) -> Option<&Symbol> {
        let index = usize::try_from(symbol.into_raw()).ok()?;
        self.symbols.get(index)
    }
}

/// Records symbols and node bindings for a [`SymbolTable`].
#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    table: SymbolTable,
}

impl SymbolTableBuilder {
    /// Adds a symbol and returns its handle. A symbol with a containing
    /// type is appended to that type's members.
    pub fn add(&mut self, symbol: Symbol) -> SymbolRef {
        let raw = u32::try_from(self.table.symbols.len()).unwrap_or(u32::MAX);
        let handle = SymbolRef::from_raw(raw);
        if let Some(parent) = symbol
            .containing_type()
            .and_then(|parent| usize::try_from(parent.into_raw()).ok())
            .and_then(|index| self.table.symbols.get_mut(index))
        {
            parent.push_member(handle);
        }
        self.table.symbols.push(symbol);
        handle
    }

    /// Binds a node to the symbol it declares or refers to.
    pub fn bind(&mut self, node: &SyntaxNode, symbol: SymbolRef) -> &mut Self {
        self.bind_span(node.kind(), node.span(), symbol)
    }

    /// Binds the node of `kind` at `span` to a symbol.
    pub fn bind_span(&mut self, kind: SyntaxKind, span: Span, symbol: SymbolRef) -> &mut Self {
        self.table.bindings.insert((kind, span), symbol);
        self
    }

    /// Records the type of a node.
    pub fn bind_type(&mut self, node: &SyntaxNode, ty: TypeRef) -> &mut Self {
        self.table.types.insert((node.kind(), node.span()), ty);
        self
    }

    /// Records the types expected at an offset.
    pub fn expect_types(&mut self, position: usize, types: Vec<TypeRef>) -> &mut Self {
        self.table.expected.insert(position, types);
        self
    }

    /// Finishes the table.
    #[must_use]
    pub fn build(self) -> SymbolTable {
        self.table
    }
}
