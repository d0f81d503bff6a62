//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Primitive types (`void`, `int`, `long`, `float`, `double`, `bool`, `string`)
//! - Function types (`(int,bool)->string`), nested to any depth
//!
//! Like statements and factors, types are dispatched on their leading token
//! through a lookup table.

use std::collections::HashMap;

use crate::{
    ast::types::{FunctionType, Primitive, Type},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;

/// Type alias for type lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    for kind in [
        TokenKind::Void,
        TokenKind::Int,
        TokenKind::Long,
        TokenKind::Float,
        TokenKind::Double,
        TokenKind::Bool,
        TokenKind::StringType,
    ] {
        parser.type_nud(kind, parse_primitive_type);
    }
    parser.type_nud(TokenKind::OpenParen, parse_function_type);
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.advance().clone();

    let primitive = match token.kind {
        TokenKind::Void => Primitive::Void,
        TokenKind::Int => Primitive::Integer,
        TokenKind::Long => Primitive::Long,
        TokenKind::Float => Primitive::Float,
        TokenKind::Double => Primitive::Double,
        TokenKind::Bool => Primitive::Bool,
        TokenKind::StringType => Primitive::String,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnsupportedType { token: token.value },
                token.span.start,
            ))
        }
    };

    Ok(Type::Primitive(primitive))
}

/// Parses `(T, ...)->R`, building the canonical name as it goes.
pub fn parse_function_type(parser: &mut Parser) -> Result<Type, Error> {
    let mut name = String::from("(");
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let parameter = parse_type(parser)?;
            name.push_str(parameter.name());
            parameters.push(parameter);

            if !parser.eat(TokenKind::Comma) {
                break;
            }
            name.push(',');
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    name.push(')');
    parser.expect(TokenKind::Dash)?;
    name.push('-');
    parser.expect(TokenKind::Greater)?;
    name.push('>');

    let return_type = parse_type(parser)?;
    name.push_str(return_type.name());

    Ok(Type::Function(FunctionType::with_name(
        name,
        parameters,
        return_type,
    )))
}

/// Parses a type at the current position.
pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token_kind = parser.current_token_kind();
    let handler = parser.get_type_nud_lookup().get(&token_kind).copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(Error::new(
            ErrorImpl::UnsupportedType {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}
