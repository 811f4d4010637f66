//! Tests for the optional parameter mismatch rule.

use mender_core::{
    CancellationToken, ConstantValue, Diagnostic, ParameterSymbol, Symbol, SymbolKind, SymbolRef,
    SymbolTable, TypeKind,
};
use mender_syntax::{Span, SyntaxKind, SyntaxTree};
use rstest::rstest;

use super::{apply_single, builtin, nodes, parse, query_rule};
use crate::RuleEngine;

const RULE: &str = "optional-parameter-mismatch";

fn parameter(name: &str, default: Option<i64>) -> ParameterSymbol {
    let plain = ParameterSymbol::new(name, None);
    if let Some(value) = default {
        return plain.with_default(ConstantValue::Int(value));
    }
    plain
}

fn method(owner: SymbolRef, parameters: Vec<ParameterSymbol>) -> Symbol {
    Symbol::new(SymbolKind::Method, "F")
        .in_type(owner)
        .with_parameters(parameters)
}

/// Builds `B.F` and its override `D.F`, bound to the first and second
/// method declarations of `tree`.
fn hierarchy(
    tree: &SyntaxTree,
    base: Vec<ParameterSymbol>,
    derived: Vec<ParameterSymbol>,
) -> SymbolTable {
    let methods = nodes(tree, SyntaxKind::MethodDeclaration);
    let mut builder = SymbolTable::builder();
    let base_type = builder.add(Symbol::new_type(TypeKind::Class, "B").in_namespace("Shapes"));
    let derived_type = builder.add(Symbol::new_type(TypeKind::Class, "D").in_namespace("Shapes"));
    let base_method = builder.add(method(base_type, base));
    let derived_method = builder.add(
        method(derived_type, derived)
            .overriding()
            .with_overridden(base_method)
            .with_base_members(vec![base_method]),
    );
    builder
        .bind(methods.first().expect("base method"), base_method)
        .bind(methods.get(1).expect("derived method"), derived_method);
    builder.build()
}

fn source(base_y: &str, derived_y: &str) -> String {
    format!(
        "class B {{ public virtual void F(int x, int y{base_y}) {{ }} }}\n\
         class D : B {{ public override void F(int x, int y{derived_y}) {{ }} }}"
    )
}

fn scan(tree: &SyntaxTree, model: &SymbolTable) -> Vec<Diagnostic> {
    RuleEngine::new(builtin())
        .scan(tree, model, &CancellationToken::new())
        .expect("scan should succeed")
        .into_iter()
        .filter(|diagnostic| diagnostic.rule_id() == RULE)
        .collect()
}

#[rstest]
#[case::missing_default(
    " = 5",
    "",
    Some(5),
    None,
    "Parameter y has default value in base method 'Shapes.B.F'",
    "Add default value from base '5'",
    " = 5"
)]
#[case::extra_default(
    "",
    " = 3",
    None,
    Some(3),
    "Optional parameter value y differs from base method 'Shapes.B'",
    "Remove parameter default value",
    ""
)]
#[case::different_default(
    " = 5",
    " = 3",
    Some(5),
    Some(3),
    "Optional parameter value y differs from base method 'Shapes.B'",
    "Change default value to 5",
    " = 5"
)]
fn aligns_default_with_base(
    #[case] base_y: &str,
    #[case] derived_y: &str,
    #[case] base_default: Option<i64>,
    #[case] derived_default: Option<i64>,
    #[case] message: &str,
    #[case] title: &str,
    #[case] fixed_y: &str,
) {
    let tree = parse(&source(base_y, derived_y));
    let model = hierarchy(
        &tree,
        vec![parameter("x", None), parameter("y", base_default)],
        vec![parameter("x", None), parameter("y", derived_default)],
    );

    let diagnostics = scan(&tree, &model);
    let [diagnostic] = diagnostics.as_slice() else {
        panic!("expected one diagnostic, got {diagnostics:?}");
    };
    assert_eq!(diagnostic.message(), message);

    let override_y = tree.text().rfind("int y").expect("override parameter") + "int ".len();
    let actions = query_rule(RULE, &tree, &model, Span::empty(override_y));
    assert_eq!(actions.first().map(crate::Action::title), Some(title));

    let edited = apply_single(&actions, &tree);
    assert_eq!(edited.text(), source(base_y, fixed_y));
}

#[test]
fn matching_defaults_are_accepted() {
    let tree = parse(&source(" = 5", " = 5"));
    let model = hierarchy(
        &tree,
        vec![parameter("x", None), parameter("y", Some(5))],
        vec![parameter("x", None), parameter("y", Some(5))],
    );
    assert!(scan(&tree, &model).is_empty());
}

#[test]
fn single_interface_member_supplies_defaults() {
    let tree = parse("interface I { void F(int x = 1); }\nclass C : I { public void F(int x) { } }");
    let methods = nodes(&tree, SyntaxKind::MethodDeclaration);
    let mut builder = SymbolTable::builder();
    let interface = builder.add(Symbol::new_type(TypeKind::Interface, "I"));
    let class = builder.add(Symbol::new_type(TypeKind::Class, "C"));
    let interface_method = builder.add(
        Symbol::new(SymbolKind::Method, "F")
            .in_type(interface)
            .with_parameters(vec![parameter("x", Some(1))]),
    );
    let class_method = builder.add(
        Symbol::new(SymbolKind::Method, "F")
            .in_type(class)
            .with_parameters(vec![parameter("x", None)])
            .with_base_members(vec![interface_method]),
    );
    builder.bind(methods.get(1).expect("class method"), class_method);
    let model = builder.build();

    let diagnostics = scan(&tree, &model);
    let [diagnostic] = diagnostics.as_slice() else {
        panic!("expected one diagnostic, got {diagnostics:?}");
    };
    assert_eq!(
        diagnostic.message(),
        "Parameter x has default value in base method 'I.F'"
    );
}

#[test]
fn several_interface_members_are_ambiguous() {
    let tree = parse("class C : I, J { public void F(int x) { } }");
    let mut builder = SymbolTable::builder();
    let first_interface = builder.add(Symbol::new_type(TypeKind::Interface, "I"));
    let second_interface = builder.add(Symbol::new_type(TypeKind::Interface, "J"));
    let class = builder.add(Symbol::new_type(TypeKind::Class, "C"));
    let from_first = builder.add(
        Symbol::new(SymbolKind::Method, "F")
            .in_type(first_interface)
            .with_parameters(vec![parameter("x", Some(1))]),
    );
    let from_second = builder.add(
        Symbol::new(SymbolKind::Method, "F")
            .in_type(second_interface)
            .with_parameters(vec![parameter("x", Some(2))]),
    );
    let class_method = builder.add(
        Symbol::new(SymbolKind::Method, "F")
            .in_type(class)
            .with_parameters(vec![parameter("x", None)])
            .with_base_members(vec![from_first, from_second]),
    );
    builder.bind(
        nodes(&tree, SyntaxKind::MethodDeclaration)
            .first()
            .expect("class method"),
        class_method,
    );
    let model = builder.build();

    assert!(scan(&tree, &model).is_empty());
}
