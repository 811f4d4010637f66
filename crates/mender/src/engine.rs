//! The rule engine: span queries and full scans.

use mender_core::{CancellationToken, Diagnostic, EngineConfig, SemanticModel};
use mender_syntax::{Span, SyntaxKind, SyntaxTree};
use tracing::{debug, trace};

use crate::action::Action;
use crate::error::EngineError;
use crate::registry::RuleRegistry;
use crate::reporter::DiagnosticReporter;
use crate::rule::{Rule, RuleContext, RuleMode};
use crate::telemetry::ENGINE_TARGET;

/// Runs registered rules against trees.
///
/// The engine is immutable; one instance can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct RuleEngine<'r> {
    registry: &'r RuleRegistry,
    config: EngineConfig,
}

struct ActiveRule<'r> {
    index: usize,
    rule: &'r (dyn Rule + 'static),
    exhausted: bool,
}

impl<'r> RuleEngine<'r> {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    #[must_use]
    pub const fn with_config(registry: &'r RuleRegistry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &'r RuleRegistry {
        self.registry
    }

    /// Offers every action applicable at `span`.
    ///
    /// Starting from the innermost node covering `span`, the engine walks
    /// up the ancestors and stops after the first member declaration, type
    /// declaration or the compilation unit. A span that extends past the
    /// end of the tree yields no actions.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] when `cancel` is raised during the
    /// walk, and [`EngineError::Invariant`] when a rule breaks a grammar
    /// invariant.
    pub fn query(
        &self,
        tree: &SyntaxTree,
        model: &dyn SemanticModel,
        span: Span,
        cancel: &CancellationToken,
    ) -> Result<Vec<Action>, EngineError> {
        let Some(start) = tree.covering_node(span) else {
            debug!(
                target: ENGINE_TARGET,
                %span,
                tree_len = tree.len(),
                "query span lies outside the tree"
            );
            return Ok(Vec::new());
        };

        let cx = RuleContext::new(tree, model, cancel, Some(span));
        let mut active: Vec<ActiveRule<'r>> = self
            .enabled_rules()
            .map(|(index, rule)| ActiveRule {
                index,
                rule,
                exhausted: false,
            })
            .collect();
        let mut found = Vec::new();
        let mut visited = 0_usize;
        let mut reached_declaration = false;

        for (visit, node) in start
            .ancestors()
            .take(self.config.max_query_depth())
            .enumerate()
        {
            cancel.check()?;
            visited = visit + 1;
            let kind = node.kind();
            for entry in &mut active {
                if entry.exhausted {
                    continue;
                }
                let descriptor = entry.rule.descriptor();
                if entry.rule.interest().contains(&kind) {
                    for finding in entry.rule.check(&cx, &node)? {
                        if descriptor.mode() == RuleMode::Analyzer && !finding.span().intersects(span) {
                            trace!(
                                target: ENGINE_TARGET,
                                rule = descriptor.id(),
                                finding_span = %finding.span(),
                                "finding outside query span"
                            );
                            continue;
                        }
                        if let Some(fix) = finding.into_fix() {
                            found.push((entry.index, visit, Action::new(descriptor.id(), fix, tree)));
                        }
                    }
                }
                if entry.rule.boundary().contains(&kind) {
                    trace!(
                        target: ENGINE_TARGET,
                        rule = descriptor.id(),
                        %kind,
                        "rule boundary reached"
                    );
                    entry.exhausted = true;
                }
            }
            if is_stopping_kind(kind) {
                reached_declaration = true;
                break;
            }
        }
        if !reached_declaration {
            debug!(
                target: ENGINE_TARGET,
                %span,
                max_query_depth = self.config.max_query_depth(),
                "query depth exhausted before an enclosing declaration"
            );
        }

        found.sort_by_key(|(index, visit, _)| (*index, *visit));
        debug!(
            target: ENGINE_TARGET,
            %span,
            visited,
            actions = found.len(),
            "query finished"
        );
        Ok(found.into_iter().map(|(_, _, action)| action).collect())
    }

    /// Runs every enabled analyzer over every node, in pre-order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] when `cancel` is raised during the
    /// traversal; no partial result is returned.
    pub fn scan(
        &self,
        tree: &SyntaxTree,
        model: &dyn SemanticModel,
        cancel: &CancellationToken,
    ) -> Result<Vec<Diagnostic>, EngineError> {
        let cx = RuleContext::new(tree, model, cancel, None);
        let analyzers: Vec<_> = self
            .enabled_rules()
            .filter(|(_, rule)| rule.descriptor().mode() == RuleMode::Analyzer)
            .collect();
        let mut reporter = DiagnosticReporter::new(tree, &self.config);
        let mut visited = 0_usize;

        for (visit, node) in tree.root().descendants().enumerate() {
            cancel.check()?;
            visited = visit + 1;
            let kind = node.kind();
            for (index, rule) in &analyzers {
                if !rule.interest().contains(&kind) {
                    continue;
                }
                for finding in rule.check(&cx, &node)? {
                    reporter.record(*index, visit, rule.descriptor(), &finding);
                }
            }
        }

        debug!(
            target: ENGINE_TARGET,
            visited,
            analyzers = analyzers.len(),
            diagnostics = reporter.len(),
            "scan finished"
        );
        Ok(reporter.finish())
    }

    fn enabled_rules(&self) -> impl Iterator<Item = (usize, &'r (dyn Rule + 'static))> + '_ {
        self.registry
            .rules()
            .enumerate()
            .filter(|(_, rule)| {
                let descriptor = rule.descriptor();
                let enabled = self
                    .config
                    .is_enabled(descriptor.id(), descriptor.category());
                if !enabled {
                    trace!(
                        target: ENGINE_TARGET,
                        rule = descriptor.id(),
                        "rule disabled by configuration"
                    );
                }
                enabled
            })
    }
}

/// Kinds after which a query stops walking up.
const fn is_stopping_kind(kind: SyntaxKind) -> bool {
    kind.is_member_declaration()
        || kind.is_type_declaration()
        || matches!(kind, SyntaxKind::CompilationUnit)
}
