use crate::lexer::tokens::TokenKind;

use super::{
    ast::{Function, Visitor},
    types::Number,
};

/// Expression
///
/// Closed set of expression nodes produced by the parser. Nodes are immutable
/// once built and own their sub-expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // LITERALS
    Number(Number),
    String(String),
    Boolean(bool),

    /// A variable reference (e.g. `foo`).
    Variable(String),

    /// `+ - * /`
    Arithmetic(BinaryExpr),
    /// `== < <= > >=`
    Relational(BinaryExpr),
    /// `&& ||`
    Logical(BinaryExpr),

    /// Unary minus (e.g. `-x`).
    Negation(Box<Expr>),
    /// Logical not (e.g. `!done`).
    Not(Box<Expr>),

    Call(CallExpr),
    /// An anonymous function literal, named `lambda$n` by the parser.
    Lambda(Box<Function>),

    /// No value; used by `return;` and by synthesized void returns.
    Void,
}

impl Expr {
    /// Dispatches this expression to `visitor` with an optional evaluation context.
    pub fn accept<V: Visitor>(
        &self,
        visitor: &mut V,
        context: Option<&mut V::Context>,
    ) -> Option<V::Value> {
        visitor.visit_expr(self, context)
    }
}

/// Binary Expression
/// Shared payload of arithmetic, relational and logical expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: TokenKind,
    pub right: Box<Expr>,
}

impl BinaryExpr {
    pub fn new(left: Expr, operator: TokenKind, right: Expr) -> Self {
        BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

/// Call Expression
/// A function invocation by name, used both as an expression and as a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub arguments: Vec<Expr>,
}
