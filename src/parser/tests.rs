//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Function and lambda declarations
//! - Expressions and operator precedence
//! - Control flow statements
//! - Speculative right-hand sides and returns
//! - Type annotations

use std::rc::Rc;

use crate::{
    ast::{
        ast::Module,
        expressions::{BinaryExpr, CallExpr, Expr},
        statements::{AssignmentStmt, IfStmt, Stmt, VarDeclStmt},
        types::{Number, Type},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::{
    expr::parse_expr,
    lookups::create_token_lookups,
    parser::{parse, Parser},
    types::{create_token_type_lookups, parse_type},
};

fn parse_module(source: &str) -> Result<Module, Error> {
    let tokens = tokenize(source.to_string(), Some("test.sl".to_string())).unwrap();
    let (_, result) = parse(tokens, Rc::new("test.sl".to_string()));
    result
}

fn parser_for(source: &str) -> Parser {
    let tokens = tokenize(source.to_string(), Some("test.sl".to_string())).unwrap();
    let mut parser = Parser::new(tokens, Rc::new("test.sl".to_string()));
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);
    parser
}

/// Parses `source` as the body of a void function and returns its statements.
fn parse_body(source: &str) -> Vec<Stmt> {
    let module = parse_module(&format!("function void main() {} end", source)).unwrap();
    module.get("main").unwrap().body.clone()
}

fn int(value: i32) -> Expr {
    Expr::Number(Number::Integer(value))
}

fn arithmetic(left: Expr, operator: TokenKind, right: Expr) -> Expr {
    Expr::Arithmetic(BinaryExpr::new(left, operator, right))
}

#[test]
fn test_parse_empty_module() {
    let module = parse_module("").unwrap();
    assert!(module.is_empty());

    let module = parse_module("// nothing here\n").unwrap();
    assert!(module.is_empty());
}

#[test]
fn test_parse_function_count_and_names() {
    let module = parse_module(
        "function int one() return 1; end
         function bool yes() return true; end
         function void hello() println \"hello\"; end",
    )
    .unwrap();

    assert_eq!(module.len(), 3);
    assert_eq!(module.names(), vec!["one", "yes", "hello"]);
    assert_eq!(module.get("one").unwrap().body, vec![Stmt::Return(int(1))]);
    assert_eq!(
        module.get("yes").unwrap().body,
        vec![Stmt::Return(Expr::Boolean(true))]
    );
    assert_eq!(module.get("hello").unwrap().return_type, Type::VOID);
}

#[test]
fn test_parse_duplicate_function_replaces_earlier() {
    let module = parse_module(
        "function int f() return 1; end
         function void g() break; end
         function int f() return 2; end",
    )
    .unwrap();

    assert_eq!(module.names(), vec!["f", "g"]);
    assert_eq!(module.get("f").unwrap().body, vec![Stmt::Return(int(2))]);
}

#[test]
fn test_parse_function_parameters_and_type() {
    let module = parse_module(
        "function long add(int a, long b,) return a + b; end",
    )
    .unwrap();
    let add = module.get("add").unwrap();

    assert_eq!(
        add.parameters,
        vec![
            (String::from("a"), Type::INTEGER),
            (String::from("b"), Type::LONG)
        ]
    );
    assert_eq!(add.function_type.name(), "(int,long)->long");
    assert!(!add.is_lambda());
}

#[test]
fn test_parse_duplicate_parameter_keeps_slot() {
    let module = parse_module("function void f(int a, bool b, string a) break; end").unwrap();
    let f = module.get("f").unwrap();

    assert_eq!(
        f.parameters,
        vec![
            (String::from("a"), Type::STRING),
            (String::from("b"), Type::BOOL)
        ]
    );
    assert_eq!(f.function_type.name(), "(string,bool)->void");
}

#[test]
fn test_parse_missing_return() {
    let error = parse_module("function int f() print 1; end").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::MissingReturn {
            function: String::from("f"),
            return_type: String::from("int")
        }
    );
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_parse_return_nested_in_branch_is_not_enough() {
    let error = parse_module(
        "function int f() if true then return 1; endif end",
    )
    .unwrap_err();

    assert_eq!(error.get_error_name(), "MissingReturn");
}

#[test]
fn test_parse_void_return_synthesized() {
    let body = parse_body("print 1;");

    assert_eq!(body, vec![Stmt::Print(int(1)), Stmt::Return(Expr::Void)]);
}

#[test]
fn test_parse_void_with_explicit_return() {
    let body = parse_body("print 1; return;");

    assert_eq!(body, vec![Stmt::Print(int(1)), Stmt::Return(Expr::Void)]);
}

#[test]
fn test_parse_left_fold() {
    let mut parser = parser_for("1 - 2 - 3");
    let expr = parse_expr(&mut parser).unwrap();

    assert_eq!(
        expr,
        arithmetic(
            arithmetic(int(1), TokenKind::Dash, int(2)),
            TokenKind::Dash,
            int(3)
        )
    );
}

#[test]
fn test_parse_precedence() {
    let mut parser = parser_for("1 + 2 * 3");
    let expr = parse_expr(&mut parser).unwrap();

    assert_eq!(
        expr,
        arithmetic(
            int(1),
            TokenKind::Plus,
            arithmetic(int(2), TokenKind::Star, int(3))
        )
    );
}

#[test]
fn test_parse_logical_and_relational_levels() {
    let mut parser = parser_for("a < 1 && !b");
    let expr = parse_expr(&mut parser).unwrap();

    assert_eq!(
        expr,
        Expr::Logical(BinaryExpr::new(
            Expr::Relational(BinaryExpr::new(
                Expr::Variable(String::from("a")),
                TokenKind::Less,
                int(1)
            )),
            TokenKind::And,
            Expr::Not(Box::new(Expr::Variable(String::from("b"))))
        ))
    );
}

#[test]
fn test_parse_unary_and_grouping() {
    let mut parser = parser_for("-(1 + 2) * +3");
    let expr = parse_expr(&mut parser).unwrap();

    assert_eq!(
        expr,
        arithmetic(
            Expr::Negation(Box::new(arithmetic(int(1), TokenKind::Plus, int(2)))),
            TokenKind::Star,
            int(3)
        )
    );
}

#[test]
fn test_parse_unexpected_token_at_leaf() {
    let mut parser = parser_for("1 + ;");
    let error = parse_expr(&mut parser).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedTokenAtLeaf {
            token: String::from(";")
        }
    );
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_parse_lambda_names() {
    let body = parse_body(
        "var (int)->int f = lambda int (int x) return x; endlambda;
         var g = lambda void () print 1; endlambda",
    );

    let names: Vec<String> = body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::VarDeclAndAssign(_, AssignmentStmt { value: Expr::Lambda(function), .. }) => {
                Some(function.name.clone())
            }
            _ => None,
        })
        .collect();

    assert_eq!(names, vec!["lambda$1", "lambda$2"]);
}

#[test]
fn test_parse_nested_lambda_numbering() {
    let body = parse_body(
        "f = lambda void ()
             g = lambda void () print 2; endlambda
         endlambda",
    );

    let Stmt::Assignment(AssignmentStmt { value: Expr::Lambda(outer), .. }) = &body[0] else {
        panic!("expected lambda assignment, got {:?}", body[0]);
    };
    let Stmt::Assignment(AssignmentStmt { value: Expr::Lambda(inner), .. }) = &outer.body[0] else {
        panic!("expected lambda assignment, got {:?}", outer.body[0]);
    };

    assert_eq!(outer.name, "lambda$1");
    assert_eq!(inner.name, "lambda$2");
    assert!(inner.is_lambda());
    assert_eq!(outer.body.last(), Some(&Stmt::Return(Expr::Void)));
}

#[test]
fn test_parse_lambda_type() {
    let body = parse_body("var f = lambda bool (int a, double b) return a < b; endlambda;");

    let Stmt::VarDeclAndAssign(declaration, AssignmentStmt { value: Expr::Lambda(lambda), .. }) =
        &body[0]
    else {
        panic!("expected lambda declaration, got {:?}", body[0]);
    };

    assert_eq!(declaration.declared_type, None);
    assert_eq!(lambda.function_type.name(), "(int,double)->bool");
}

#[test]
fn test_parse_lambda_missing_return() {
    let error = parse_module(
        "function void main() var f = lambda int () print 1; endlambda end",
    )
    .unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::MissingReturn {
            function: String::from("lambda$1"),
            return_type: String::from("int")
        }
    );
}

#[test]
fn test_parse_empty_branch() {
    let error = parse_module("function void f() if true then endif end").unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::EmptyBranch);

    let error =
        parse_module("function void f() if true then else print 1; endif end").unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::EmptyBranch);
}

#[test]
fn test_parse_empty_else_branch_allowed() {
    let body = parse_body("if x then print 1; else endif");

    assert_eq!(
        body[0],
        Stmt::If(IfStmt {
            condition: Expr::Variable(String::from("x")),
            then_body: vec![Stmt::Print(int(1))],
            else_body: vec![],
        })
    );
}

#[test]
fn test_parse_if_else() {
    let body = parse_body("if x == 1 then print 1; print 2; else println 3; endif");

    let Stmt::If(if_stmt) = &body[0] else {
        panic!("expected if, got {:?}", body[0]);
    };
    assert_eq!(if_stmt.then_body.len(), 2);
    assert_eq!(if_stmt.else_body, vec![Stmt::Println(int(3))]);
}

#[test]
fn test_parse_empty_loop() {
    let error = parse_module("function void f() while true wend end").unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::EmptyLoop);
}

#[test]
fn test_parse_while_with_break() {
    let body = parse_body("while i < 10 i = i + 1; break; wend");

    let Stmt::While(while_stmt) = &body[0] else {
        panic!("expected while, got {:?}", body[0]);
    };
    assert_eq!(while_stmt.body.len(), 2);
    assert_eq!(while_stmt.body[1], Stmt::Break);
}

#[test]
fn test_parse_var_call_fallback() {
    let body = parse_body("var x = foo(1, 2);");

    assert_eq!(
        body[0],
        Stmt::VarDeclAndAssign(
            VarDeclStmt {
                name: String::from("x"),
                declared_type: None
            },
            AssignmentStmt {
                name: String::from("x"),
                value: Expr::Call(CallExpr {
                    name: String::from("foo"),
                    arguments: vec![int(1), int(2)]
                })
            }
        )
    );
}

#[test]
fn test_parse_var_declaration_forms() {
    let body = parse_body("var int a; var string s = \"hi\"; var b = a;");

    assert_eq!(
        body[0],
        Stmt::VarDecl(VarDeclStmt {
            name: String::from("a"),
            declared_type: Some(Type::INTEGER)
        })
    );
    let Stmt::VarDeclAndAssign(declaration, assignment) = &body[1] else {
        panic!("expected declaration with assignment, got {:?}", body[1]);
    };
    assert_eq!(declaration.declared_type, Some(Type::STRING));
    assert_eq!(assignment.value, Expr::String(String::from("hi")));
    assert!(matches!(
        &body[2],
        Stmt::VarDeclAndAssign(_, AssignmentStmt { value: Expr::Variable(_), .. })
    ));
}

#[test]
fn test_parse_var_missing_identifier() {
    let error = parse_module("function void f() var int = 1; end").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: String::from("="),
            message: String::from("expected identifier during variable declaration")
        }
    );
}

#[test]
fn test_parse_call_and_assignment_statements() {
    let body = parse_body("greet(\"bob\"); total = total * 2; tick();");

    assert_eq!(
        body[0],
        Stmt::Call(CallExpr {
            name: String::from("greet"),
            arguments: vec![Expr::String(String::from("bob"))]
        })
    );
    assert!(matches!(&body[1], Stmt::Assignment(AssignmentStmt { value: Expr::Arithmetic(_), .. })));
    assert!(matches!(&body[2], Stmt::Call(CallExpr { arguments, .. }) if arguments.is_empty()));
}

#[test]
fn test_parse_assignment_call_fallback() {
    let body = parse_body("x = add(1, y + 2);");

    assert_eq!(
        body[0],
        Stmt::Assignment(AssignmentStmt {
            name: String::from("x"),
            value: Expr::Call(CallExpr {
                name: String::from("add"),
                arguments: vec![
                    int(1),
                    arithmetic(Expr::Variable(String::from("y")), TokenKind::Plus, int(2))
                ]
            })
        })
    );
}

#[test]
fn test_parse_call_inside_expression_is_rejected() {
    let error = parse_module("function void f() x = 1 + g(2); end").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: String::from("("),
            message: String::from("expected Semicolon")
        }
    );
}

fn assert_expected_semicolon_at(source: &str, offset: usize) {
    let error = parse_module(source).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: String::from("("),
            message: String::from("expected Semicolon")
        }
    );
    assert_eq!(error.get_position().0, offset);
}

#[test]
fn test_parse_call_after_leading_operand_keeps_original_error() {
    assert_expected_semicolon_at("function void f() x = a + g(2); end", 27);
    assert_expected_semicolon_at("function void f() var y = a + g(2); end", 31);
    assert_expected_semicolon_at("function int f() return a * g(2); end", 29);
}

#[test]
fn test_parse_identifier_statement_without_call_or_assignment() {
    let error = parse_module("function void f() x; end").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedToken {
            token: String::from(";")
        }
    );
}

#[test]
fn test_parse_return_forms() {
    let module = parse_module(
        "function int a() return 1 + 2; end
         function int b() return twice(3); end
         function void c() return; end",
    )
    .unwrap();

    assert_eq!(
        module.get("a").unwrap().body,
        vec![Stmt::Return(arithmetic(int(1), TokenKind::Plus, int(2)))]
    );
    assert_eq!(
        module.get("b").unwrap().body,
        vec![Stmt::Return(Expr::Call(CallExpr {
            name: String::from("twice"),
            arguments: vec![int(3)]
        }))]
    );
    assert_eq!(module.get("c").unwrap().body, vec![Stmt::Return(Expr::Void)]);
}

#[test]
fn test_parse_return_lambda_is_rejected() {
    let error = parse_module(
        "function ()->void f() return lambda void () print 1; endlambda end",
    )
    .unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenAtLeaf");
}

#[test]
fn test_parse_unexpected_statement() {
    let error = parse_module("function void f() 42; end").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedToken {
            token: String::from("42")
        }
    );
}

#[test]
fn test_parse_missing_end_stops_at_eof() {
    let error = parse_module("function void f() print 1;").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedToken {
            token: String::from("EOF")
        }
    );
}

#[test]
fn test_parse_empty_function_body() {
    let error = parse_module("function void f() end").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnexpectedToken {
            token: String::from("end")
        }
    );
}

#[test]
fn test_parse_types() {
    let mut parser = parser_for("int (int,bool)->string ((int)->bool,long)->()->double ()->void");

    assert_eq!(parse_type(&mut parser).unwrap(), Type::INTEGER);
    assert_eq!(
        parse_type(&mut parser).unwrap(),
        Type::function(vec![Type::INTEGER, Type::BOOL], Type::STRING)
    );
    assert_eq!(
        parse_type(&mut parser).unwrap().name(),
        "((int)->bool,long)->()->double"
    );
    assert_eq!(parse_type(&mut parser).unwrap().name(), "()->void");
}

#[test]
fn test_parse_unsupported_type() {
    let error = parse_module("function foo f() return 1; end").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnsupportedType {
            token: String::from("foo")
        }
    );
    assert_eq!(error.get_position().0, 9);
}

#[test]
fn test_parse_function_type_trailing_comma_rejected() {
    let mut parser = parser_for("(int,)->void");

    assert_eq!(
        parse_type(&mut parser).unwrap_err().get_error_name(),
        "UnsupportedType"
    );
}

#[test]
fn test_speculate_restores_cursor() {
    let mut parser = parser_for("foo ( 1 )");

    let no_match = parser
        .speculate(|parser| {
            parse_expr(parser)?;
            parser.expect(TokenKind::Semicolon)
        })
        .unwrap_err();

    assert!(no_match.looks_like_call());
    assert_eq!(parser.current_token_kind(), TokenKind::Identifier);
    assert_eq!(parser.previous_token_kind(), None);
}

#[test]
fn test_speculate_call_must_start_the_attempt() {
    let mut parser = parser_for("a + g ( 2 )");

    let no_match = parser
        .speculate(|parser| {
            parse_expr(parser)?;
            parser.expect(TokenKind::Semicolon)
        })
        .unwrap_err();

    assert_eq!(no_match.previous, Some(TokenKind::Identifier));
    assert_eq!(no_match.current, TokenKind::OpenParen);
    assert_eq!(no_match.failed_at, 3);
    assert!(!no_match.looks_like_call());
    assert_eq!(parser.current_token().value, "a");
}

#[test]
fn test_speculate_keeps_progress_on_success() {
    let mut parser = parser_for("1 + 2 ;");

    let expr = parser.speculate(parse_expr).unwrap();

    assert_eq!(expr, arithmetic(int(1), TokenKind::Plus, int(2)));
    assert_eq!(parser.current_token_kind(), TokenKind::Semicolon);
}

#[test]
fn test_advance_stops_at_eof() {
    let mut parser = parser_for("x");

    assert_eq!(parser.advance().kind, TokenKind::Identifier);
    assert_eq!(parser.advance().kind, TokenKind::EOF);
    assert_eq!(parser.advance().kind, TokenKind::EOF);
    assert!(!parser.has_tokens());
}

#[test]
fn test_literal_accessors() {
    let mut parser = parser_for("name \"text\" 7L");

    assert_eq!(parser.variable_name().unwrap(), "name");
    assert!(parser.number_literal().is_err());
    assert_eq!(parser.string_literal().unwrap(), "text");
    assert_eq!(parser.number_literal().unwrap(), Number::Long(7));
}

#[test]
fn test_parser_appends_eof() {
    let parser = Parser::new(vec![], Rc::new("test.sl".to_string()));

    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
}
