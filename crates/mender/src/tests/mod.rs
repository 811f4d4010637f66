//! Unit and behavioural tests for the rule engine and built-in rules.

mod builtin_edits_tests;
mod explicit_to_implicit_tests;
mod optional_parameter_tests;
mod redundant_true_condition_tests;
mod reporter_tests;
mod telemetry_tests;

use std::io;
use std::sync::{Arc, Mutex};

use mender_core::{
    CancellationToken, OperationCancelled, SemanticModel, Symbol, SymbolRef, TypeRef,
};
use mender_syntax::{Parser, Span, SyntaxKind, SyntaxNode, SyntaxTree};
use mockall::mock;
use tracing_subscriber::EnvFilter;

use crate::{Action, RuleEngine, RuleRegistry};

mock! {
    Model {}
    impl SemanticModel for Model {
        fn resolve(
            &self,
            node: &SyntaxNode,
            cancel: &CancellationToken,
        ) -> Result<Option<SymbolRef>, OperationCancelled>;
        fn type_of(
            &self,
            node: &SyntaxNode,
            cancel: &CancellationToken,
        ) -> Result<Option<TypeRef>, OperationCancelled>;
        fn infer_types(
            &self,
            context: &SyntaxNode,
            position: usize,
            cancel: &CancellationToken,
        ) -> Result<Vec<TypeRef>, OperationCancelled>;
        fn symbol(&self, symbol: SymbolRef) -> Option<&'static Symbol>;
    }
}

/// Parses `source`, which must be free of syntax errors.
pub(crate) fn parse(source: &str) -> SyntaxTree {
    let tree = Parser::new().parse(source).expect("source should parse");
    assert!(!tree.has_errors(), "unexpected syntax errors in {source:?}");
    tree
}

/// Returns every node of `kind`, in pre-order.
pub(crate) fn nodes(tree: &SyntaxTree, kind: SyntaxKind) -> Vec<SyntaxNode> {
    tree.root()
        .descendants()
        .filter(|node| node.kind() == kind)
        .collect()
}

/// Returns the first node of `kind`.
pub(crate) fn first(tree: &SyntaxTree, kind: SyntaxKind) -> SyntaxNode {
    nodes(tree, kind)
        .into_iter()
        .next()
        .expect("node of kind should exist")
}

/// Returns the span of the first occurrence of `needle` in the tree text.
pub(crate) fn span_of(tree: &SyntaxTree, needle: &str) -> Span {
    let start = tree.text().find(needle).expect("needle should occur");
    Span::new(start, needle.len())
}

/// Returns an empty span at the first occurrence of `needle`.
pub(crate) fn caret_at(tree: &SyntaxTree, needle: &str) -> Span {
    Span::empty(span_of(tree, needle).start())
}

pub(crate) fn builtin() -> &'static RuleRegistry {
    RuleRegistry::builtin().expect("built-in rules should register")
}

/// Runs a query with every built-in rule enabled.
pub(crate) fn query(tree: &SyntaxTree, model: &dyn SemanticModel, span: Span) -> Vec<Action> {
    RuleEngine::new(builtin())
        .query(tree, model, span, &CancellationToken::new())
        .expect("query should succeed")
}

/// Runs a query and keeps only the actions offered by `rule_id`.
pub(crate) fn query_rule(
    rule_id: &str,
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
    span: Span,
) -> Vec<Action> {
    query(tree, model, span)
        .into_iter()
        .filter(|action| action.rule_id() == rule_id)
        .collect()
}

/// Applies the only action in `actions`.
pub(crate) fn apply_single(actions: &[Action], tree: &SyntaxTree) -> SyntaxTree {
    let [action] = actions else {
        panic!("expected exactly one action, got {actions:?}");
    };
    let edited = action.apply(tree).expect("action should apply");
    assert_reparses(&edited);
    edited
}

/// Asserts that `edited` is well formed and is exactly the tree the parser
/// builds from its text.
pub(crate) fn assert_reparses(edited: &SyntaxTree) {
    edited.validate().expect("edited tree should be well formed");
    let reparsed = Parser::new()
        .parse(&edited.text())
        .expect("edited text should parse");
    assert!(
        !reparsed.has_errors(),
        "edited text has syntax errors: {:?}",
        reparsed.errors()
    );
    assert!(
        reparsed.is_same_snapshot(edited),
        "edited tree differs from its reparse:\n{edited:#?}\n{reparsed:#?}"
    );
}

/// Collects everything logged under `filter` while `run` executes.
pub(crate) fn captured_logs(filter: &str, run: impl FnOnce()) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(move || LogBuffer(Arc::clone(&sink)))
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    let bytes = buffer.lock().map(|logged| logged.clone()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
