use std::slice::Iter;

use super::{
    expressions::Expr,
    statements::Stmt,
    types::{FunctionType, Type},
};

/// A named or anonymous function.
///
/// Parameters keep their declaration order; the order decides positional
/// binding at call sites and the parameter list of `function_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<(String, Type)>,
    pub body: Vec<Stmt>,
    pub function_type: Type,
}

impl Function {
    /// Creates a function, deriving its function type from the parameters and return type.
    pub fn new(
        name: String,
        return_type: Type,
        parameters: Vec<(String, Type)>,
        body: Vec<Stmt>,
    ) -> Self {
        let parameter_types = parameters.iter().map(|(_, ty)| ty.clone()).collect();
        let function_type = Type::Function(FunctionType::new(parameter_types, return_type.clone()));

        Function {
            name,
            return_type,
            parameters,
            body,
            function_type,
        }
    }

    pub fn get_parameter(&self, name: &str) -> Option<&Type> {
        self.parameters
            .iter()
            .find(|(parameter, _)| parameter == name)
            .map(|(_, ty)| ty)
    }

    pub fn is_lambda(&self) -> bool {
        self.name.starts_with("lambda$")
    }
}

/// The root of a parsed program: every top-level function, by name, in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Module { functions: vec![] }
    }

    /// Adds a function. A function with the same name is replaced in its
    /// original slot and returned.
    pub fn insert(&mut self, function: Function) -> Option<Function> {
        match self.functions.iter_mut().find(|f| f.name == function.name) {
            Some(existing) => Some(std::mem::replace(existing, function)),
            None => {
                self.functions.push(function);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn iter(&self) -> Iter<'_, Function> {
        self.functions.iter()
    }
}

impl<'a> IntoIterator for &'a Module {
    type Item = &'a Function;
    type IntoIter = Iter<'a, Function>;

    fn into_iter(self) -> Self::IntoIter {
        self.functions.iter()
    }
}

/// Visitor hook for evaluators and other tree walkers.
///
/// Every node hands itself to the visitor through `accept`, together with an
/// optional evaluation context, and gets back an optional value.
pub trait Visitor: Sized {
    type Context;
    type Value;

    fn visit_expr(
        &mut self,
        expr: &Expr,
        context: Option<&mut Self::Context>,
    ) -> Option<Self::Value> {
        walk_expr(self, expr, context);
        None
    }

    fn visit_stmt(
        &mut self,
        stmt: &Stmt,
        context: Option<&mut Self::Context>,
    ) -> Option<Self::Value> {
        walk_stmt(self, stmt, context);
        None
    }
}

/// Visits every direct child expression of `expr`.
pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr, mut context: Option<&mut V::Context>) {
    match expr {
        Expr::Number(_) | Expr::String(_) | Expr::Boolean(_) | Expr::Variable(_) | Expr::Void => {}
        Expr::Arithmetic(binary) | Expr::Relational(binary) | Expr::Logical(binary) => {
            visitor.visit_expr(&binary.left, context.as_deref_mut());
            visitor.visit_expr(&binary.right, context);
        }
        Expr::Negation(operand) | Expr::Not(operand) => {
            visitor.visit_expr(operand, context);
        }
        Expr::Call(call) => {
            for argument in &call.arguments {
                visitor.visit_expr(argument, context.as_deref_mut());
            }
        }
        Expr::Lambda(function) => walk_body(visitor, &function.body, context),
    }
}

/// Visits every direct child expression and statement of `stmt`.
pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt, mut context: Option<&mut V::Context>) {
    match stmt {
        Stmt::Print(expr) | Stmt::Println(expr) | Stmt::Return(expr) => {
            visitor.visit_expr(expr, context);
        }
        Stmt::VarDecl(_) | Stmt::Break => {}
        Stmt::Assignment(assignment) | Stmt::VarDeclAndAssign(_, assignment) => {
            visitor.visit_expr(&assignment.value, context);
        }
        Stmt::Call(call) => {
            for argument in &call.arguments {
                visitor.visit_expr(argument, context.as_deref_mut());
            }
        }
        Stmt::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.condition, context.as_deref_mut());
            walk_body(visitor, &if_stmt.then_body, context.as_deref_mut());
            walk_body(visitor, &if_stmt.else_body, context);
        }
        Stmt::While(while_stmt) => {
            visitor.visit_expr(&while_stmt.condition, context.as_deref_mut());
            walk_body(visitor, &while_stmt.body, context);
        }
    }
}

fn walk_body<V: Visitor>(visitor: &mut V, body: &[Stmt], mut context: Option<&mut V::Context>) {
    for stmt in body {
        visitor.visit_stmt(stmt, context.as_deref_mut());
    }
}
