//! Shared data model for the Mender rewrite engine.
//!
//! Rules, the engine and hosts agree on the types defined here:
//!
//! - [`Diagnostic`], [`Severity`] and [`Category`] for analyzer output
//! - [`EngineConfig`] and [`RuleOverride`] for enabling and re-grading rules
//! - [`TelemetryConfig`] and [`LogFormat`] for hosts installing a subscriber
//! - [`CancellationToken`] and [`OperationCancelled`] for cooperative
//!   cancellation
//! - [`SemanticModel`], [`SymbolRef`], [`TypeRef`] and [`Symbol`], the
//!   contract semantic services implement, and [`SymbolTable`], an in-memory
//!   implementation
//!
//! # Example
//!
//! ```
//! use mender_core::{CancellationToken, EngineConfig};
//!
//! let cancel = CancellationToken::new();
//! assert!(cancel.check().is_ok());
//! assert_eq!(EngineConfig::default().max_query_depth(), 256);
//! ```

mod cancel;
mod config;
mod diagnostic;
mod logging;
mod semantic;

pub use cancel::{CancellationToken, OperationCancelled};
pub use config::{ConfigError, DEFAULT_MAX_QUERY_DEPTH, EngineConfig, RuleOverride};
pub use diagnostic::{Category, Diagnostic, Severity};
pub use logging::{
    DEFAULT_LOG_FILTER, LogArea, LogFormat, LogFormatParseError, LogLevel, TelemetryConfig,
};
pub use semantic::{
    ConstantValue, ParameterSymbol, SemanticModel, Symbol, SymbolKind, SymbolRef, SymbolTable,
    SymbolTableBuilder, TypeKind, TypeRef,
};

#[cfg(test)]
mod tests;
