//! Tests for [`SymbolTable`] and symbol data.

use mender_syntax::{Parser, SyntaxKind, SyntaxNode, SyntaxTree};
use rstest::{fixture, rstest};

use crate::{
    CancellationToken, ConstantValue, OperationCancelled, ParameterSymbol, SemanticModel, Symbol,
    SymbolKind, SymbolTable, TypeKind, TypeRef,
};

const SOURCE: &str = "class Widget { void Draw(int x) { Draw(1); } }";

#[fixture]
fn tree() -> SyntaxTree {
    Parser::new().parse(SOURCE).expect("source should parse")
}

fn first(tree: &SyntaxTree, kind: SyntaxKind) -> SyntaxNode {
    tree.root()
        .descendants()
        .find(|node| node.kind() == kind)
        .expect("node of kind should exist")
}

#[rstest]
fn bound_nodes_resolve_to_their_symbols(tree: SyntaxTree) {
    let class = first(&tree, SyntaxKind::ClassDeclaration);
    let method = first(&tree, SyntaxKind::MethodDeclaration);
    let call = first(&tree, SyntaxKind::InvocationExpression);

    let mut builder = SymbolTable::builder();
    let widget = builder.add(Symbol::new_type(TypeKind::Class, "Widget").in_namespace("Shapes"));
    let draw = builder.add(Symbol::new(SymbolKind::Method, "Draw").in_type(widget));
    builder.bind(&class, widget).bind(&method, draw).bind(&call, draw);
    let table = builder.build();
    let cancel = CancellationToken::new();

    assert_eq!(table.resolve(&method, &cancel).expect("resolve"), Some(draw));
    assert_eq!(table.resolve(&call, &cancel).expect("resolve"), Some(draw));
    let body = first(&tree, SyntaxKind::Block);
    assert_eq!(table.resolve(&body, &cancel).expect("resolve"), None);
    assert_eq!(table.len(), 2);
}

#[test]
fn members_are_recorded_on_the_containing_type() {
    let mut builder = SymbolTable::builder();
    let widget = builder.add(Symbol::new_type(TypeKind::Class, "Widget"));
    let draw = builder.add(Symbol::new(SymbolKind::Method, "Draw").in_type(widget));
    let size = builder.add(Symbol::new(SymbolKind::Property, "Size").in_type(widget));
    let table = builder.build();

    let members = table.symbol(widget).expect("widget symbol").members();
    assert_eq!(members, [draw, size].as_slice());
}

#[test]
fn full_name_joins_namespace_and_types() {
    let mut builder = SymbolTable::builder();
    let system_type = builder.add(Symbol::new_type(TypeKind::Class, "Type").in_namespace("System"));
    let get_type = builder.add(Symbol::new(SymbolKind::Method, "GetType").in_type(system_type));
    let loose = builder.add(Symbol::new_type(TypeKind::Interface, "IThing"));
    let table = builder.build();

    assert_eq!(table.full_name(system_type).as_deref(), Some("System.Type"));
    assert_eq!(table.full_name(get_type).as_deref(), Some("System.Type.GetType"));
    assert_eq!(table.full_name(loose).as_deref(), Some("IThing"));
}

#[rstest]
fn resolution_observes_cancellation(tree: SyntaxTree) {
    let method = first(&tree, SyntaxKind::MethodDeclaration);
    let table = SymbolTable::builder().build();
    let cancel = CancellationToken::new();
    cancel.cancel();

    assert_eq!(table.resolve(&method, &cancel), Err(OperationCancelled));
    assert_eq!(table.type_of(&method, &cancel), Err(OperationCancelled));
    assert_eq!(table.infer_types(&method, 0, &cancel), Err(OperationCancelled));
}

#[rstest]
fn types_and_expectations_are_recorded(tree: SyntaxTree) {
    let literal = first(&tree, SyntaxKind::LiteralExpression);
    let mut builder = SymbolTable::builder();
    let int = TypeRef::new(builder.add(Symbol::new_type(TypeKind::Struct, "Int32")));
    builder
        .bind_type(&literal, int)
        .expect_types(literal.span().start(), vec![int]);
    let table = builder.build();
    let cancel = CancellationToken::new();

    assert_eq!(table.type_of(&literal, &cancel).expect("type_of"), Some(int));
    let root = tree.root();
    assert_eq!(
        table
            .infer_types(&root, literal.span().start(), &cancel)
            .expect("infer_types"),
        vec![int]
    );
    assert!(
        table
            .infer_types(&literal, 0, &cancel)
            .expect("infer_types")
            .is_empty()
    );
}

#[rstest]
#[case(ConstantValue::Null, "null")]
#[case(ConstantValue::Bool(true), "true")]
#[case(ConstantValue::Int(42), "42")]
#[case(ConstantValue::Char('\''), r"'\''")]
#[case(ConstantValue::String(String::from("a\nb")), r#""a\nb""#)]
fn constants_render_as_literals(#[case] value: ConstantValue, #[case] literal: &str) {
    assert_eq!(value.to_literal(), literal);
    assert_eq!(value.to_string(), literal);
}

#[test]
fn signatures_compare_parameter_types() {
    let mut builder = SymbolTable::builder();
    let int = TypeRef::new(builder.add(Symbol::new_type(TypeKind::Struct, "Int32")));
    let text = TypeRef::new(builder.add(Symbol::new_type(TypeKind::Class, "String")));
    let one = Symbol::new(SymbolKind::Method, "M")
        .with_parameters(vec![ParameterSymbol::new("a", Some(int))]);
    let same = Symbol::new(SymbolKind::Method, "N")
        .with_parameters(vec![ParameterSymbol::new("b", Some(int))]);
    let other = Symbol::new(SymbolKind::Method, "M")
        .with_parameters(vec![ParameterSymbol::new("a", Some(text))]);

    assert!(one.has_same_signature(&same));
    assert!(!one.has_same_signature(&other));
    assert!(!one.has_same_signature(&Symbol::new(SymbolKind::Method, "M")));
}

#[test]
fn parameters_report_optionality() {
    let required = ParameterSymbol::new("x", None);
    let optional = ParameterSymbol::new("y", None).with_default(ConstantValue::Int(5));
    let rest = ParameterSymbol::new("z", None).params();

    assert!(!required.is_optional());
    assert_eq!(optional.default_value(), Some(&ConstantValue::Int(5)));
    assert!(rest.is_params());
}

#[test]
fn delegates_expose_their_invoke_signature() {
    let mut builder = SymbolTable::builder();
    let int = TypeRef::new(builder.add(Symbol::new_type(TypeKind::Struct, "Int32")));
    let handler = builder.add(Symbol::new_type(TypeKind::Delegate, "Handler"));
    let invoke = builder.add(
        Symbol::new(SymbolKind::Method, "Invoke")
            .in_type(handler)
            .with_parameters(vec![ParameterSymbol::new("value", Some(int))])
            .with_return_type(int),
    );
    let table = builder.build();

    let delegate = table.symbol(handler).expect("delegate");
    assert!(delegate.is_delegate());
    assert_eq!(delegate.members(), &[invoke]);
    let signature = table.symbol(invoke).expect("invoke");
    assert_eq!(signature.return_type(), Some(int));
    assert!(!table.symbol(int.symbol()).expect("int").is_delegate());
    assert_eq!(Symbol::new(SymbolKind::Method, "Run").return_type(), None);
}
