//! The semantic service contract.
//!
//! Rules never compute semantics themselves. They ask a [`SemanticModel`]
//! paired with one tree snapshot to resolve nodes to symbols, then read the
//! symbol data by handle. Hosts back the trait with their own resolver; the
//! in-memory [`SymbolTable`] serves embedders and tests that know the
//! symbols up front.

mod symbol;
mod table;

pub use symbol::{ConstantValue, ParameterSymbol, Symbol, SymbolKind, TypeKind};
pub use table::{SymbolTable, SymbolTableBuilder};

use mender_syntax::SyntaxNode;
use serde::{Deserialize, Serialize};

use crate::cancel::{CancellationToken, OperationCancelled};

/// Opaque handle to a symbol in one model snapshot.
///
/// Handles compare by identity; two handles are equal exactly when they
/// name the same symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolRef(u32);

impl SymbolRef {
    /// Wraps a raw handle value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn into_raw(self) -> u32 {
        self.0
    }
}

/// Handle to a named type symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeRef(SymbolRef);

impl TypeRef {
    /// Wraps the handle of a type symbol.
    #[must_use]
    pub const fn new(symbol: SymbolRef) -> Self {
        Self(symbol)
    }

    /// Returns the handle of the type symbol.
    #[must_use]
    pub const fn symbol(self) -> SymbolRef {
        self.0
    }
}

/// Read-only semantic queries over one tree snapshot.
///
/// Every resolution checks the cancellation token first and reports a
/// raised token as [`OperationCancelled`]. "Unresolved" is `Ok(None)`, never
/// an error. Nodes must come from the tree this model was built for.
pub trait SemanticModel: Send + Sync {
    /// Resolves a declaration, invocation, member access or name to the
    /// symbol it declares or refers to.
    ///
    /// # Errors
    ///
    /// Returns [`OperationCancelled`] when `cancel` has been raised.
    fn resolve(
        &self,
        node: &SyntaxNode,
        cancel: &CancellationToken,
    ) -> Result<Option<SymbolRef>, OperationCancelled>;

    /// Returns the type of an expression or type syntax.
    ///
    /// # Errors
    ///
    /// Returns [`OperationCancelled`] when `cancel` has been raised.
    fn type_of(
        &self,
        node: &SyntaxNode,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeRef>, OperationCancelled>;

    /// Returns the types an expression at `position` inside `context` is
    /// expected to have, best candidate first.
    ///
    /// # Errors
    ///
    /// Returns [`OperationCancelled`] when `cancel` has been raised.
    fn infer_types(
        &self,
        context: &SyntaxNode,
        position: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<TypeRef>, OperationCancelled>;

    /// Returns the data behind a handle.
    fn symbol(&self, symbol: SymbolRef) -> Option<&Symbol>;

    /// Resolves `node` and reads the symbol in one step.
    ///
    /// # Errors
    ///
    /// Returns [`OperationCancelled`] when `cancel` has been raised.
    fn resolve_symbol(
        &self,
        node: &SyntaxNode,
        cancel: &CancellationToken,
    ) -> Result<Option<(SymbolRef, &Symbol)>, OperationCancelled> {
        Ok(self
            .resolve(node, cancel)?
            .and_then(|handle| self.symbol(handle).map(|symbol| (handle, symbol))))
    }

    /// Returns the fully qualified name of a symbol: namespace, containing
    /// types and name joined by dots.
    fn full_name(&self, symbol: SymbolRef) -> Option<String> {
        let data = self.symbol(symbol)?;
        let prefix = data.containing_type().map_or_else(
            || data.namespace().map(ToOwned::to_owned),
            |parent| self.full_name(parent),
        );
        Some(match prefix {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}.{}", data.name()),
            _ => data.name().to_owned(),
        })
    }
}
