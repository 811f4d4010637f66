//! Tests for the explicit to implicit interface implementation refactoring.

use insta::assert_snapshot;
use mender_core::{ParameterSymbol, Symbol, SymbolKind, SymbolTable, TypeKind};
use mender_syntax::{SyntaxKind, SyntaxTree};

use super::{apply_single, nodes, parse, query_rule, span_of};

const RULE: &str = "explicit-to-implicit-interface-impl";

/// Declares `I.Run` and `C.Run`, binding the explicit implementation to
/// the last declaration of `kind`, plus any extra `C` members.
fn model(tree: &SyntaxTree, kind: SyntaxKind, extra: &[(SymbolKind, &str, usize)]) -> SymbolTable {
    let symbol_kind = if kind == SyntaxKind::PropertyDeclaration {
        SymbolKind::Property
    } else {
        SymbolKind::Method
    };
    let mut builder = SymbolTable::builder();
    let interface = builder.add(Symbol::new_type(TypeKind::Interface, "I"));
    let class = builder.add(Symbol::new_type(TypeKind::Class, "C"));
    let target = builder.add(Symbol::new(symbol_kind, "Run").in_type(interface));
    let explicit = builder.add(
        Symbol::new(symbol_kind, "Run")
            .in_type(class)
            .with_explicit_implementations(vec![target]),
    );
    for (extra_kind, name, arity) in extra {
        let parameters = (0..*arity)
            .map(|index| ParameterSymbol::new(format!("p{index}"), None))
            .collect();
        builder.add(
            Symbol::new(*extra_kind, *name)
                .in_type(class)
                .with_parameters(parameters),
        );
    }
    let declaration = nodes(tree, kind)
        .into_iter()
        .find(|node| node.text().contains("I."))
        .expect("explicit declaration");
    builder.bind(&declaration, explicit);
    builder.build()
}

#[test]
fn converts_method_to_public_member() {
    let tree = parse("interface I { void Run(); }\nclass C : I { void I.Run() { } }");
    let model = model(&tree, SyntaxKind::MethodDeclaration, &[]);

    let actions = query_rule(RULE, &tree, &model, span_of(&tree, "I."));
    let action = actions.first().expect("one action");
    assert_eq!(action.title(), "Convert explicit to implicit implementation");

    let edited = apply_single(&actions, &tree);
    assert_snapshot!(
        edited.text(),
        @r"
    interface I { void Run(); }
    class C : I { public void Run() { } }
    "
    );
}

#[test]
fn converts_property_to_public_member() {
    let tree = parse("interface I { int Run { get; } }\nclass C : I {\n    int I.Run { get { return 1; } }\n}");
    let model = model(&tree, SyntaxKind::PropertyDeclaration, &[]);

    let actions = query_rule(RULE, &tree, &model, span_of(&tree, "I."));
    let edited = apply_single(&actions, &tree);
    assert_eq!(
        edited.text(),
        "interface I { int Run { get; } }\nclass C : I {\n    public int Run { get { return 1; } }\n}"
    );
}

#[test]
fn collision_with_same_signature_withholds_offer() {
    let tree = parse("interface I { void Run(); }\nclass C : I { void I.Run() { } public void Run() { } }");
    let model = model(
        &tree,
        SyntaxKind::MethodDeclaration,
        &[(SymbolKind::Method, "Run", 0)],
    );

    assert!(query_rule(RULE, &tree, &model, span_of(&tree, "I.")).is_empty());
}

#[test]
fn overload_with_other_signature_does_not_collide() {
    let tree = parse("interface I { void Run(); }\nclass C : I { void I.Run() { } public void Run(int x) { } }");
    let model = model(
        &tree,
        SyntaxKind::MethodDeclaration,
        &[(SymbolKind::Method, "Run", 1)],
    );

    assert_eq!(query_rule(RULE, &tree, &model, span_of(&tree, "I.")).len(), 1);
}

#[test]
fn span_outside_specifier_offers_nothing() {
    let tree = parse("interface I { void Run(); }\nclass C : I { void I.Run() { } }");
    let model = model(&tree, SyntaxKind::MethodDeclaration, &[]);

    let name = span_of(&tree, "Run() { }");
    let span = mender_syntax::Span::new(name.start(), "Run".len());
    assert!(query_rule(RULE, &tree, &model, span).is_empty());
}
