//! Applies one edit from every built-in rule that offers edits and checks
//! that the result is exactly what the parser builds from the new text.

use mender_core::{
    ConstantValue, ParameterSymbol, Symbol, SymbolKind, SymbolTable, TypeKind, TypeRef,
};
use mender_syntax::{Span, SyntaxKind, SyntaxTree};
use rstest::rstest;

use super::{apply_single, builtin, caret_at, nodes, parse, query_rule, span_of};

/// Rules that report diagnostics but never offer an edit.
const REPORT_ONLY: [&str; 2] = [
    "mistaken-type-introspection-call",
    "base-call-with-implicit-defaults",
];

const EDITING: [&str; 6] = [
    "explicit-to-implicit-interface-impl",
    "redundant-true-loop-condition",
    "optional-parameter-mismatch",
    "add-argument-name",
    "initialize-auto-property-from-parameter",
    "method-group-to-anonymous-method",
];

struct Scenario {
    tree: SyntaxTree,
    model: SymbolTable,
    span: Span,
    expected: &'static str,
}

fn explicit_member() -> Scenario {
    let tree = parse("interface I { void Run(); }\nclass C : I {\n    void I.Run() { }\n}");
    let mut builder = SymbolTable::builder();
    let interface = builder.add(Symbol::new_type(TypeKind::Interface, "I"));
    let class = builder.add(Symbol::new_type(TypeKind::Class, "C"));
    let target = builder.add(Symbol::new(SymbolKind::Method, "Run").in_type(interface));
    let explicit = builder.add(
        Symbol::new(SymbolKind::Method, "Run")
            .in_type(class)
            .with_explicit_implementations(vec![target]),
    );
    let declaration = nodes(&tree, SyntaxKind::MethodDeclaration)
        .into_iter()
        .last()
        .expect("explicit declaration");
    builder.bind(&declaration, explicit);
    Scenario {
        span: span_of(&tree, "I."),
        model: builder.build(),
        tree,
        expected: "interface I { void Run(); }\nclass C : I {\n    public void Run() { }\n}",
    }
}

fn true_condition() -> Scenario {
    let tree = parse("class C { void M() { for (; /* ever */ true; ) { } } }");
    Scenario {
        span: span_of(&tree, "true"),
        model: SymbolTable::builder().build(),
        tree,
        expected: "class C { void M() { for (; /* ever */ ; ) { } } }",
    }
}

fn missing_default() -> Scenario {
    let tree = parse(
        "class B { public virtual void F(int y = 5) { } }\n\
         class D : B { public override void F(int y) { } }",
    );
    let mut builder = SymbolTable::builder();
    let base_type = builder.add(Symbol::new_type(TypeKind::Class, "B"));
    let derived_type = builder.add(Symbol::new_type(TypeKind::Class, "D"));
    let base = builder.add(
        Symbol::new(SymbolKind::Method, "F")
            .in_type(base_type)
            .with_parameters(vec![
                ParameterSymbol::new("y", None).with_default(ConstantValue::Int(5)),
            ]),
    );
    let derived = builder.add(
        Symbol::new(SymbolKind::Method, "F")
            .in_type(derived_type)
            .with_parameters(vec![ParameterSymbol::new("y", None)])
            .overriding()
            .with_overridden(base)
            .with_base_members(vec![base]),
    );
    let methods = nodes(&tree, SyntaxKind::MethodDeclaration);
    builder
        .bind(methods.first().expect("base method"), base)
        .bind(methods.get(1).expect("override"), derived);
    let parameter = tree.text().rfind("y)").expect("override parameter");
    Scenario {
        span: Span::empty(parameter),
        model: builder.build(),
        tree,
        expected: "class B { public virtual void F(int y = 5) { } }\n\
                   class D : B { public override void F(int y = 5) { } }",
    }
}

fn positional_arguments() -> Scenario {
    let tree = parse("class C { void M() { Draw(1,\n    2); } }");
    let mut builder = SymbolTable::builder();
    let draw = builder.add(Symbol::new(SymbolKind::Method, "Draw").with_parameters(vec![
        ParameterSymbol::new("x", None),
        ParameterSymbol::new("y", None),
    ]));
    builder.bind(
        nodes(&tree, SyntaxKind::InvocationExpression)
            .first()
            .expect("call"),
        draw,
    );
    Scenario {
        span: caret_at(&tree, "1"),
        model: builder.build(),
        tree,
        expected: "class C { void M() { Draw(x: 1,\n    y: 2); } }",
    }
}

fn constructor_parameter() -> Scenario {
    let tree = parse("class P {\n    P(int x) {\n    }\n}");
    Scenario {
        span: caret_at(&tree, "x)"),
        model: SymbolTable::builder().build(),
        tree,
        expected: "class P {\n    public int X { get; set; }\n    P(int x) {\n        X = x;\n    }\n}",
    }
}

fn method_group() -> Scenario {
    let tree = parse("class C { void M() { Run(\n    Parse); } }");
    let mut builder = SymbolTable::builder();
    let text = TypeRef::new(builder.add(Symbol::new_type(TypeKind::Class, "String")));
    let flag = TypeRef::new(builder.add(Symbol::new_type(TypeKind::Struct, "Boolean")));
    let predicate = builder.add(Symbol::new_type(TypeKind::Delegate, "Predicate"));
    builder.add(
        Symbol::new(SymbolKind::Method, "Invoke")
            .in_type(predicate)
            .with_parameters(vec![ParameterSymbol::new("value", Some(text))])
            .with_return_type(flag),
    );
    builder.expect_types(span_of(&tree, "Parse").start(), vec![TypeRef::new(predicate)]);
    Scenario {
        span: caret_at(&tree, "Parse"),
        model: builder.build(),
        tree,
        expected: "class C { void M() { Run(\n    delegate (String value) { return Parse(value); }); } }",
    }
}

#[rstest]
#[case::explicit_to_implicit("explicit-to-implicit-interface-impl", explicit_member())]
#[case::redundant_true("redundant-true-loop-condition", true_condition())]
#[case::optional_parameter("optional-parameter-mismatch", missing_default())]
#[case::argument_name("add-argument-name", positional_arguments())]
#[case::auto_property("initialize-auto-property-from-parameter", constructor_parameter())]
#[case::anonymous_method("method-group-to-anonymous-method", method_group())]
fn edits_reparse_to_the_same_tree(#[case] rule: &str, #[case] scenario: Scenario) {
    let Scenario {
        tree,
        model,
        span,
        expected,
    } = scenario;

    let actions = query_rule(rule, &tree, &model, span);
    let edited = apply_single(&actions, &tree);

    assert_eq!(edited.text(), expected);
    assert!(!edited.has_errors());
}

#[test]
fn every_builtin_rule_is_covered() {
    let mut covered: Vec<&str> = EDITING.iter().chain(&REPORT_ONLY).copied().collect();
    covered.sort_unstable();
    let mut registered: Vec<&str> = builtin()
        .rules()
        .map(|rule| rule.descriptor().id())
        .collect();
    registered.sort_unstable();
    assert_eq!(covered, registered);
}
