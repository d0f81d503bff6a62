//! Function and lambda declarations.
//!
//! ```text
//! function <type> <name> ( <type> <name>, ... ) <stmt>... end
//! lambda <type> ( <type> <name>, ... ) <stmt>... endlambda
//! ```

use crate::{
    ast::{ast::Function, expressions::Expr, statements::Stmt, types::Type},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{parser::Parser, stmt::parse_stmt, types::parse_type};

pub fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    let start = parser.expect(TokenKind::Function)?.span.start;

    let return_type = parse_type(parser)?;
    let name = parser
        .expect_error(TokenKind::Identifier, Some("expected function name"))?
        .value;
    let parameters = parse_parameters(parser)?;
    let body = parse_function_body(parser, &name, &return_type, TokenKind::End, start)?;

    Ok(Function::new(name, return_type, parameters, body))
}

/// Parses a lambda literal into an anonymous [`Function`] named `lambda$n`.
pub fn parse_lambda_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::Lambda)?.span.start;
    let name = parser.next_lambda_name();

    let return_type = parse_type(parser)?;
    let parameters = parse_parameters(parser)?;
    let body = parse_function_body(parser, &name, &return_type, TokenKind::EndLambda, start)?;

    Ok(Expr::Lambda(Box::new(Function::new(
        name,
        return_type,
        parameters,
        body,
    ))))
}

/// Parses `( <type> <name>, ... )`.
///
/// A repeated parameter name replaces the earlier type but keeps its slot.
/// A trailing comma is accepted.
pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<(String, Type)>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters: Vec<(String, Type)> = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let ty = parse_type(parser)?;
        let name = parser
            .expect_error(TokenKind::Identifier, Some("expected parameter name"))?
            .value;

        match parameters.iter_mut().find(|(existing, _)| *existing == name) {
            Some(parameter) => parameter.1 = ty,
            None => parameters.push((name, ty)),
        }

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(parameters)
}

/// Parses one or more statements up to and including `terminator`.
///
/// A non-void function must contain a `return` among its statements; a void
/// function without one gets `return` of the void expression appended.
fn parse_function_body(
    parser: &mut Parser,
    name: &str,
    return_type: &Type,
    terminator: TokenKind,
    start: Position,
) -> Result<Vec<Stmt>, Error> {
    let mut body = vec![];
    loop {
        body.push(parse_stmt(parser)?);

        if parser.current_token_kind() == terminator {
            break;
        }
    }

    let found_return = body.iter().any(Stmt::is_return);
    if !found_return {
        if !return_type.is_void() {
            return Err(Error::new(
                ErrorImpl::MissingReturn {
                    function: name.to_string(),
                    return_type: return_type.name().to_string(),
                },
                start,
            ));
        }
        body.push(Stmt::Return(Expr::Void));
    }

    parser.expect(terminator)?;

    Ok(body)
}
