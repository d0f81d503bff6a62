/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Functions, the module root, and the visitor hook
/// - expressions: The expression node set
/// - statements: The statement node set
/// - types: Primitive and function types, numeric literal values
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
