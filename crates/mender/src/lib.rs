//! Pattern-matching rewrite engine for syntax trees.
//!
//! Mender couples three stages:
//!
//! 1. **Match**: a [`Rule`] declares the node kinds it cares about and
//!    inspects each candidate node structurally
//! 2. **Validate**: the rule consults a [`SemanticModel`] through its
//!    [`RuleContext`] before claiming a match
//! 3. **Rewrite**: each match may carry a deferred [`Fix`]; the engine turns
//!    it into an [`Action`] whose edit runs only when the host applies it,
//!    yielding a new [`SyntaxTree`] that shares unchanged subtrees with the
//!    original
//!
//! Hosts drive the engine in two ways. [`RuleEngine::query`] offers every
//! action applicable at a span, walking from the innermost covering node up
//! to the enclosing declaration. [`RuleEngine::scan`] runs analyzers over a
//! whole tree and returns [`Diagnostic`]s. Both honour a
//! [`CancellationToken`] and never return partial results.
//!
//! The built-in rules live in [`rules`] and are available as a process-wide
//! registry through [`RuleRegistry::builtin`].
//!
//! # Example
//!
//! ```
//! use mender::{CancellationToken, Parser, RuleEngine, RuleRegistry, Span, SymbolTable};
//!
//! let tree = Parser::new().parse("class C { void M() { for (; true; ) { } } }")?;
//! let model = SymbolTable::builder().build();
//! let registry = RuleRegistry::builtin()?;
//! let engine = RuleEngine::new(registry);
//!
//! let offset = tree.text().find("true").unwrap_or_default();
//! let actions = engine.query(&tree, &model, Span::new(offset, 4), &CancellationToken::new())?;
//! let edited = actions[0].apply(&tree)?;
//! assert_eq!(edited.text(), "class C { void M() { for (; ; ) { } } }");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod action;
mod engine;
mod error;
mod registry;
mod reporter;
mod rule;
pub mod rules;
pub mod telemetry;

pub use action::Action;
pub use engine::RuleEngine;
pub use error::{AmbiguousBaseDefault, ApplyError, EngineError, RegistryError};
pub use registry::{RuleRegistry, RuleRegistryBuilder};
pub use reporter::DiagnosticReporter;
pub use rule::{EditFn, Finding, Fix, Rule, RuleContext, RuleDescriptor, RuleMode};

pub use mender_core::{
    CancellationToken, Category, ConfigError, ConstantValue, Diagnostic, EngineConfig, LogArea,
    LogFormat, LogLevel, OperationCancelled, ParameterSymbol, RuleOverride, SemanticModel,
    Severity, Symbol, SymbolKind, SymbolRef, SymbolTable, SymbolTableBuilder, TelemetryConfig,
    TypeKind, TypeRef,
};
pub use mender_syntax::{
    GreenElement, GreenNode, GreenToken, LineCol, Parser, Replacement, Role, Span, SyntaxError,
    SyntaxIssue, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTree, make,
};

#[cfg(test)]
mod tests;
