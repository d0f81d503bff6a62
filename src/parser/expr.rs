use crate::{
    ast::expressions::{BinaryExpr, CallExpr, Expr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses a full expression, starting at the lowest precedence level.
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::Logical)
}

/// Parses one precedence level: an operand from the next level up, then any
/// number of `operator operand` pairs of this level, folded to the left.
pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    if bp >= BindingPower::Unary {
        return parse_unary_expr(parser);
    }

    let mut left = parse_binary_expr(parser, bp.next())?;

    while parser.get_bp_lookup().get(&parser.current_token_kind()) == Some(&bp) {
        let operator = parser.advance().kind;
        let right = parse_binary_expr(parser, bp.next())?;
        let binary = BinaryExpr::new(left, operator, right);

        left = match bp {
            BindingPower::Logical => Expr::Logical(binary),
            BindingPower::Relational => Expr::Relational(binary),
            _ => Expr::Arithmetic(binary),
        };
    }

    Ok(left)
}

/// Parses a factor or a prefix operator applied to one.
pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    let handler = parser.get_nud_lookup().get(&token_kind).copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(Error::new(
            ErrorImpl::UnexpectedTokenAtLeaf {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => Ok(Expr::Number(parser.number_literal()?)),
        TokenKind::String => Ok(Expr::String(parser.string_literal()?)),
        TokenKind::Identifier => Ok(Expr::Variable(parser.variable_name()?)),
        TokenKind::True => {
            parser.advance();
            Ok(Expr::Boolean(true))
        }
        TokenKind::False => {
            parser.advance();
            Ok(Expr::Boolean(false))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenAtLeaf {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = parser.advance().kind;
    let operand = parse_unary_expr(parser)?;

    Ok(match operator {
        TokenKind::Dash => Expr::Negation(Box::new(operand)),
        TokenKind::Not => Expr::Not(Box::new(operand)),
        // Unary plus changes nothing
        _ => operand,
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses `name(arg, ...)` without the trailing `;`.
pub fn parse_call_expr(parser: &mut Parser) -> Result<CallExpr, Error> {
    let name = parser
        .expect_error(TokenKind::Identifier, Some("expected function name"))?
        .value;
    parse_call_arguments(parser, name)
}

/// Parses the parenthesized argument list of a call to `name`.
pub fn parse_call_arguments(parser: &mut Parser, name: String) -> Result<CallExpr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser)?);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(CallExpr { name, arguments })
}
