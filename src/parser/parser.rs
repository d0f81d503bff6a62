//! Parser implementation for building the program tree.
//!
//! This module contains the main Parser struct and the module-level entry
//! point. The parser is a recursive-descent driver over the token vector
//! produced by the lexer; it maintains lookup tables for:
//! - Statement handlers, keyed by the statement's leading token
//! - Factor (prefix) handlers for the leaf level of expressions
//! - Binding powers of the binary operators
//! - Type handlers, keyed by the type's leading token
//!
//! Speculative parses go through [`Parser::speculate`], which rewinds the
//! cursor when the attempted production fails.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{ast::Module, types::Number},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    function::parse_function,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, NUDHandler, NUDLookup, StmtHandler,
        StmtLookup,
    },
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
///
/// One parser owns one token stream, the cursor into it and the lambda
/// counter; it is used for a single parse.
pub struct Parser {
    /// The list of tokens to parse, always ending with `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for factor handlers
    nud_lookup: NUDLookup,
    /// Lookup table for binary operator binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type handlers
    type_nud_lookup: TypeNUDLookup,
    /// Number of lambdas named so far
    lambda_count: u64,
}

/// A saved cursor position, see [`Parser::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint(usize);

/// Outcome of a failed speculative parse.
///
/// The cursor has already been restored to where the attempt started;
/// `previous` and `current` record the token kinds at the point the attempt
/// failed so the caller can pick an alternative production.
#[derive(Debug, Clone)]
pub struct NoMatch {
    pub error: Error,
    pub previous: Option<TokenKind>,
    pub current: TokenKind,
    /// Where the attempt started
    pub start: Checkpoint,
    /// Cursor at the point of failure
    pub failed_at: usize,
}

impl NoMatch {
    /// The attempt stopped at the `(` right after its first token, an
    /// identifier: the input is a call `name(...)`.
    pub fn looks_like_call(&self) -> bool {
        self.previous == Some(TokenKind::Identifier)
            && self.current == TokenKind::OpenParen
            && self.failed_at == self.start.0 + 1
    }

    pub fn into_error(self) -> Error {
        self.error
    }
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse; an `EOF` token is appended if missing
    /// * `file` - Source file name, used for the position of a synthesized `EOF`
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            let span = Span {
                start: end.clone(),
                end,
            };
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            lambda_count: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the last consumed token, if any.
    pub fn previous_token_kind(&self) -> Option<TokenKind> {
        self.pos
            .checked_sub(1)
            .map(|previous| self.tokens[previous].kind)
    }

    /// Advances to the next token and returns the consumed one.
    ///
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let consumed = self.pos;
        if self.tokens[consumed].kind != TokenKind::EOF {
            self.pos += 1;
        }
        &self.tokens[consumed]
    }

    /// Expects a token of the specified kind, with optional custom message.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) and consumes it if the current token matches,
    /// otherwise returns an Error without consuming anything.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        message: Option<&str>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            let message = match message {
                Some(message) => message.to_string(),
                None => format!("expected {}", expected_kind),
            };
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message,
                },
                token.span.start.clone(),
            ));
        }

        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes an identifier and returns its name.
    pub fn variable_name(&mut self) -> Result<String, Error> {
        Ok(self.expect(TokenKind::Identifier)?.value)
    }

    /// Consumes a string literal and returns its unescaped contents.
    pub fn string_literal(&mut self) -> Result<String, Error> {
        Ok(self.expect(TokenKind::String)?.value)
    }

    /// Consumes a number literal and returns its typed value.
    pub fn number_literal(&mut self) -> Result<Number, Error> {
        let token = self.expect(TokenKind::Number)?;
        token.number.ok_or(Error::new(
            ErrorImpl::NumberParseError { token: token.value },
            token.span.start,
        ))
    }

    /// Consumes the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns true until the current token is `EOF`.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Builds an unexpected-token error for the current token.
    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    /// Saves the cursor so it can be rewound with [`Parser::restore`].
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0;
    }

    /// Attempts `production`; on failure the cursor is rewound to where the
    /// attempt started and the failure is returned as a [`NoMatch`].
    pub fn speculate<T>(
        &mut self,
        production: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, NoMatch> {
        let checkpoint = self.checkpoint();

        production(self).map_err(|error| {
            let no_match = NoMatch {
                error,
                previous: self.previous_token_kind(),
                current: self.current_token_kind(),
                start: checkpoint,
                failed_at: self.pos,
            };
            self.restore(checkpoint);
            no_match
        })
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the factor lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Registers a binary operator at the given precedence level.
    pub fn binary(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a factor handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type handler for a token.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the next synthesized lambda name: `lambda$1`, `lambda$2`, ...
    pub fn next_lambda_name(&mut self) -> String {
        self.lambda_count += 1;
        format!("lambda${}", self.lambda_count)
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses every function declaration until `EOF`.
pub fn parse_module(parser: &mut Parser) -> Result<Module, Error> {
    let mut module = Module::new();

    while parser.has_tokens() {
        module.insert(parse_function(parser)?);
    }

    Ok(module)
}

/// Parses a stream of tokens into a [`Module`].
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses function declarations until EOF.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing)
/// - Result containing either the Module or the first Error
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Parser, Result<Module, Error>) {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let module = parse_module(&mut parser);

    (parser, module)
}
