//! Parser module for building the program tree.
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into a [`Module`](crate::ast::ast::Module). It handles:
//!
//! - Function and lambda declarations
//! - Statement parsing (declarations, assignments, calls, control flow)
//! - Expression parsing, one function per precedence level
//! - Type parsing for primitive and function types
//!
//! The right-hand side of `=` and the operand of `return` are resolved
//! speculatively: the parser rewinds to a checkpoint and tries the
//! alternative production when the general expression does not fit.

pub mod expr;
pub mod function;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
