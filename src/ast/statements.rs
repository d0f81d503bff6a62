use super::{
    ast::Visitor,
    expressions::{CallExpr, Expr},
    types::Type,
};

/// Statement
///
/// Closed set of statement nodes that make up a function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Print(Expr),
    Println(Expr),
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    /// `var x = ...;` keeps both halves so an evaluator can declare, then assign.
    VarDeclAndAssign(VarDeclStmt, AssignmentStmt),
    Call(CallExpr),
    If(IfStmt),
    While(WhileStmt),
    Break,
    Return(Expr),
}

impl Stmt {
    /// Dispatches this statement to `visitor` with an optional evaluation context.
    pub fn accept<V: Visitor>(
        &self,
        visitor: &mut V,
        context: Option<&mut V::Context>,
    ) -> Option<V::Value> {
        visitor.visit_stmt(self, context)
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Stmt::Return(_))
    }
}

/// A variable declaration without an initializer.
///
/// `declared_type` is `None` when the source omits the type (`var x;`).
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub name: String,
    pub declared_type: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    /// Empty when there is no `else`, or when the `else` branch is empty.
    pub else_body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}
