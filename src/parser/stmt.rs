use crate::{
    ast::{
        expressions::Expr,
        statements::{AssignmentStmt, IfStmt, Stmt, VarDeclStmt, WhileStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_call_arguments, parse_call_expr, parse_expr},
    function::parse_lambda_expr,
    parser::{NoMatch, Parser},
    types::parse_type,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected()),
    }
}

/// Parses `<expr> ;`.
fn parse_terminated_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let expr = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(expr)
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let newline = parser.advance().kind == TokenKind::Println;
    let expr = parse_terminated_expr(parser)?;

    if newline {
        Ok(Stmt::Println(expr))
    } else {
        Ok(Stmt::Print(expr))
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Var)?;

    let next = parser.current_token_kind();
    let declared_type = if next.is_primitive_type() || next == TokenKind::OpenParen {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let name = parser
        .expect_error(
            TokenKind::Identifier,
            Some("expected identifier during variable declaration"),
        )?
        .value;
    let declaration = VarDeclStmt {
        name: name.clone(),
        declared_type,
    };

    if parser.eat(TokenKind::Semicolon) {
        return Ok(Stmt::VarDecl(declaration));
    }

    parser.expect_error(TokenKind::Assignment, Some("expected `;` or `=`"))?;
    let value = parse_assignment_value(parser)?;

    Ok(Stmt::VarDeclAndAssign(
        declaration,
        AssignmentStmt { name, value },
    ))
}

/// Parses a statement led by a bare identifier: a call or an assignment.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parser.variable_name()?;

    match parser.current_token_kind() {
        TokenKind::OpenParen => {
            let call = parse_call_arguments(parser, name)?;
            parser.expect(TokenKind::Semicolon)?;
            Ok(Stmt::Call(call))
        }
        TokenKind::Assignment => {
            parser.advance();
            let value = parse_assignment_value(parser)?;
            Ok(Stmt::Assignment(AssignmentStmt { name, value }))
        }
        _ => Err(parser.unexpected()),
    }
}

/// Parses the right-hand side of `=`: `<expr> ;`, `name(args) ;` or a lambda
/// with an optional `;` after `endlambda`.
fn parse_assignment_value(parser: &mut Parser) -> Result<Expr, Error> {
    let no_match = match parser.speculate(parse_terminated_expr) {
        Ok(expr) => return Ok(expr),
        Err(no_match) => no_match,
    };

    if parser.current_token_kind() == TokenKind::Lambda {
        let lambda = parse_lambda_expr(parser)?;
        parser.eat(TokenKind::Semicolon);
        return Ok(lambda);
    }

    parse_call_fallback(parser, no_match)
}

/// Retries a failed `<expr> ;` as `name(args) ;` when the attempt stopped at
/// the `(` following its first token, otherwise surfaces the original failure.
fn parse_call_fallback(parser: &mut Parser, no_match: NoMatch) -> Result<Expr, Error> {
    if !no_match.looks_like_call() {
        return Err(no_match.into_error());
    }

    let call = parse_call_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Expr::Call(call))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::Then)?;

    if parser
        .current_token()
        .is_one_of_many(&[TokenKind::Else, TokenKind::EndIf])
    {
        return Err(Error::new(ErrorImpl::EmptyBranch, start));
    }

    let mut then_body = vec![];
    while !parser
        .current_token()
        .is_one_of_many(&[TokenKind::Else, TokenKind::EndIf])
    {
        then_body.push(parse_stmt(parser)?);
    }

    // The false branch may be empty
    let mut else_body = vec![];
    if parser.eat(TokenKind::Else) {
        while parser.current_token_kind() != TokenKind::EndIf {
            else_body.push(parse_stmt(parser)?);
        }
    }

    parser.expect(TokenKind::EndIf)?;

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        else_body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;

    let condition = parse_expr(parser)?;

    if parser.current_token_kind() == TokenKind::Wend {
        return Err(Error::new(ErrorImpl::EmptyLoop, start));
    }

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::Wend {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::Wend)?;

    Ok(Stmt::While(WhileStmt { condition, body }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Break)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Break)
}

/// Parses `return <expr> ;`, `return ;` or `return name(args) ;`.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Return)?;

    let no_match = match parser.speculate(parse_terminated_expr) {
        Ok(expr) => return Ok(Stmt::Return(expr)),
        Err(no_match) => no_match,
    };

    if parser.eat(TokenKind::Semicolon) {
        return Ok(Stmt::Return(Expr::Void));
    }

    Ok(Stmt::Return(parse_call_fallback(parser, no_match)?))
}
