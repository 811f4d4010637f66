//! Diagnostics produced by analyzer rules.
//!
//! A [`Diagnostic`] is a plain value: it names the rule that raised it, the
//! span it is anchored at, a graded [`Severity`], a [`Category`] tag and a
//! human-readable message. Diagnostics serialise with serde so hosts can
//! forward them without further mapping.

use std::fmt;

use mender_syntax::{LineCol, Span};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How strongly a diagnostic is presented.
///
/// Severities are ordered from least to most severe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[non_exhaustive]
pub enum Severity {
    /// Shown only on request.
    Hint,
    /// A suggested improvement.
    Suggestion,
    /// Probably a mistake.
    Warning,
    /// Certainly a mistake.
    Error,
}

/// Grouping tag shared by related rules.
///
/// `Display` renders the human title; parsing accepts the snake-case name.
///
/// # Example
///
/// ```
/// use mender_core::Category;
///
/// let category: Category = "code_quality".parse().expect("known category");
/// assert_eq!(category.to_string(), "Code quality");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
#[non_exhaustive]
pub enum Category {
    /// Code that can be removed without changing behaviour.
    #[strum(to_string = "Redundancies in code", serialize = "redundancies_in_code")]
    RedundanciesInCode,
    /// Idioms that are legal but likely unintended.
    #[strum(
        to_string = "Practices and improvements",
        serialize = "practices_and_improvements"
    )]
    PracticesAndImprovements,
    /// Code that is likely to behave differently than it reads.
    #[strum(to_string = "Code quality", serialize = "code_quality")]
    CodeQuality,
    /// Behaviour-preserving rewrites offered on request.
    #[strum(to_string = "Refactorings", serialize = "refactorings")]
    Refactorings,
}

/// A single finding reported by an analyzer rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    rule_id: String,
    span: Span,
    severity: Severity,
    category: Category,
    message: String,
    start: LineCol,
}

impl Diagnostic {
    /// Creates a diagnostic.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        span: Span,
        severity: Severity,
        category: Category,
        message: impl Into<String>,
        start: LineCol,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            span,
            severity,
            category,
            message: message.into(),
            start,
        }
    }

    /// Returns the id of the rule that raised this diagnostic.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    /// Returns the span the diagnostic is anchored at.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the severity after configuration overrides.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the rule's category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the one-based line and column of the span start.
    #[must_use]
    pub const fn start(&self) -> LineCol {
        self.start
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} [{}] {}",
            self.start.line, self.start.column, self.severity, self.rule_id, self.message
        )
    }
}
