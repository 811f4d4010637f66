//! Aggregation of analyzer findings into diagnostics.

use mender_core::{Diagnostic, EngineConfig};
use mender_syntax::{LineIndex, SyntaxTree};

use crate::rule::{Finding, RuleDescriptor};

#[derive(Debug)]
struct Entry {
    rule_index: usize,
    visit: usize,
    diagnostic: Diagnostic,
}

/// Collects diagnostics for one scan.
///
/// The reporter applies configured severities and positions as findings
/// arrive, and [`DiagnosticReporter::finish`] orders them by rule
/// registration index, then by node visit order. Nothing is retained once
/// the reporter is consumed.
#[derive(Debug)]
pub struct DiagnosticReporter<'c> {
    config: &'c EngineConfig,
    line_index: LineIndex,
    entries: Vec<Entry>,
}

impl<'c> DiagnosticReporter<'c> {
    /// Creates a reporter for `tree`.
    #[must_use]
    pub fn new(tree: &SyntaxTree, config: &'c EngineConfig) -> Self {
        Self {
            config,
            line_index: tree.line_index(),
            entries: Vec::new(),
        }
    }

    /// Records a finding raised by the rule at `rule_index` while visiting
    /// the `visit`-th node.
    pub fn record(
        &mut self,
        rule_index: usize,
        visit: usize,
        descriptor: &RuleDescriptor,
        finding: &Finding,
    ) {
        let severity =
            self.config
                .severity_for(descriptor.id(), descriptor.category(), descriptor.severity());
        let span = finding.span();
        let diagnostic = Diagnostic::new(
            descriptor.id(),
            span,
            severity,
            descriptor.category(),
            finding.message(),
            self.line_index.line_col(span.start()),
        );
        self.entries.push(Entry {
            rule_index,
            visit,
            diagnostic,
        });
    }

    /// Returns the number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the diagnostics in report order.
    #[must_use]
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.entries
            .sort_by_key(|entry| (entry.rule_index, entry.visit));
        self.entries
            .into_iter()
            .map(|entry| entry.diagnostic)
            .collect()
    }
}
