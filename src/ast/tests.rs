//! Unit tests for the AST and type model.

use crate::lexer::tokens::TokenKind;

use super::{
    ast::{walk_expr, Function, Module, Visitor},
    expressions::{BinaryExpr, Expr},
    statements::Stmt,
    types::{Number, Primitive, Type},
};

fn function(name: &str) -> Function {
    Function::new(
        name.to_string(),
        Type::VOID,
        vec![],
        vec![Stmt::Return(Expr::Void)],
    )
}

#[test]
fn test_primitive_names() {
    assert_eq!(Type::VOID.name(), "void");
    assert_eq!(Type::INTEGER.name(), "int");
    assert_eq!(Type::LONG.name(), "long");
    assert_eq!(Type::FLOAT.name(), "float");
    assert_eq!(Type::DOUBLE.name(), "double");
    assert_eq!(Type::BOOL.name(), "bool");
    assert_eq!(Type::STRING.name(), "string");
}

#[test]
fn test_function_type_name() {
    let ty = Type::function(vec![Type::INTEGER, Type::BOOL], Type::STRING);
    assert_eq!(ty.name(), "(int,bool)->string");

    let empty = Type::function(vec![], Type::VOID);
    assert_eq!(empty.name(), "()->void");
    assert!(empty.is_function());
    assert!(!empty.is_void());
}

#[test]
fn test_nested_function_type_name() {
    let callback = Type::function(vec![Type::INTEGER], Type::BOOL);
    let ty = Type::function(vec![callback, Type::LONG], Type::function(vec![], Type::DOUBLE));

    assert_eq!(ty.name(), "((int)->bool,long)->()->double");
}

#[test]
fn test_structural_type_equality() {
    let a = Type::function(vec![Type::INTEGER, Type::function(vec![], Type::VOID)], Type::BOOL);
    let b = Type::function(vec![Type::INTEGER, Type::function(vec![], Type::VOID)], Type::BOOL);
    let c = Type::function(vec![Type::INTEGER], Type::BOOL);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(Type::INTEGER, Type::LONG);
}

#[test]
fn test_number_primitive() {
    assert_eq!(Number::Integer(1).primitive(), Primitive::Integer);
    assert_eq!(Number::Long(1).primitive(), Primitive::Long);
    assert_eq!(Number::Float(1.0).primitive(), Primitive::Float);
    assert_eq!(Number::Double(1.0).primitive(), Primitive::Double);
}

#[test]
fn test_function_type_from_parameters() {
    let f = Function::new(
        "add".to_string(),
        Type::INTEGER,
        vec![("a".to_string(), Type::INTEGER), ("b".to_string(), Type::LONG)],
        vec![Stmt::Return(Expr::Variable("a".to_string()))],
    );

    assert_eq!(f.function_type.name(), "(int,long)->int");
    assert_eq!(f.get_parameter("b"), Some(&Type::LONG));
    assert_eq!(f.get_parameter("c"), None);
    assert!(!f.is_lambda());
}

#[test]
fn test_module_keeps_declaration_order() {
    let mut module = Module::new();
    module.insert(function("main"));
    module.insert(function("helper"));
    module.insert(function("other"));

    assert_eq!(module.names(), vec!["main", "helper", "other"]);
    assert_eq!(module.len(), 3);
}

#[test]
fn test_module_replaces_colliding_name_in_place() {
    let mut module = Module::new();
    module.insert(function("a"));
    module.insert(function("b"));

    let replacement = Function::new(
        "a".to_string(),
        Type::INTEGER,
        vec![],
        vec![Stmt::Return(Expr::Number(Number::Integer(1)))],
    );
    let previous = module.insert(replacement);

    assert!(previous.is_some());
    assert_eq!(module.names(), vec!["a", "b"]);
    assert_eq!(module.get("a").unwrap().return_type, Type::INTEGER);
}

struct VariableCounter {
    seen: Vec<String>,
}

impl Visitor for VariableCounter {
    type Context = usize;
    type Value = ();

    fn visit_expr(&mut self, expr: &Expr, mut context: Option<&mut usize>) -> Option<()> {
        if let Expr::Variable(name) = expr {
            self.seen.push(name.clone());
            if let Some(count) = context.as_deref_mut() {
                *count += 1;
            }
        }
        walk_expr(self, expr, context);
        None
    }
}

#[test]
fn test_visitor_walks_children() {
    let expr = Expr::Arithmetic(BinaryExpr::new(
        Expr::Variable("a".to_string()),
        TokenKind::Plus,
        Expr::Negation(Box::new(Expr::Variable("b".to_string()))),
    ));
    let stmt = Stmt::Println(expr);

    let mut visitor = VariableCounter { seen: vec![] };
    let mut count = 0;
    stmt.accept(&mut visitor, Some(&mut count));

    assert_eq!(visitor.seen, vec!["a", "b"]);
    assert_eq!(count, 2);
}
