//! Type system definitions for the AST.
//!
//! This module defines the types a slang program can name:
//!
//! - Primitive types (`void`, numbers, `bool`, `string`)
//! - Function types, used both for declared functions and for lambdas
//! - Numeric literal values tagged with their concrete primitive
//!
//! Every type has a canonical name. Function types embed the canonical names
//! of their parameter and return types, so two structurally identical function
//! types always have the same name and compare equal.

use std::fmt::Display;

/// Represents the primitive types in the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Void,
    Integer,
    Long,
    Float,
    Double,
    Bool,
    String,
}

impl Primitive {
    /// Returns the canonical name of the primitive, which is also its keyword.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Void => "void",
            Primitive::Integer => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bool => "bool",
            Primitive::String => "string",
        }
    }
}

/// Represents a function (or lambda) type: `(int,bool)->string`.
#[derive(Debug, Clone)]
pub struct FunctionType {
    name: String,
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
}

impl FunctionType {
    /// Builds a function type and computes its canonical name.
    pub fn new(parameters: Vec<Type>, return_type: Type) -> Self {
        let joined = parameters
            .iter()
            .map(|parameter| parameter.name())
            .collect::<Vec<_>>()
            .join(",");
        let name = format!("({})->{}", joined, return_type.name());

        FunctionType {
            name,
            parameters,
            return_type: Box::new(return_type),
        }
    }

    /// Builds a function type whose canonical name was assembled while parsing.
    ///
    /// The name must be the one [`FunctionType::new`] would produce for the
    /// same parts; the type parser builds it token by token.
    pub(crate) fn with_name(name: String, parameters: Vec<Type>, return_type: Type) -> Self {
        FunctionType {
            name,
            parameters,
            return_type: Box::new(return_type),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A type as written in the source or derived from a declaration.
#[derive(Debug, Clone)]
pub enum Type {
    Primitive(Primitive),
    Function(FunctionType),
}

impl Type {
    pub const VOID: Type = Type::Primitive(Primitive::Void);
    pub const INTEGER: Type = Type::Primitive(Primitive::Integer);
    pub const LONG: Type = Type::Primitive(Primitive::Long);
    pub const FLOAT: Type = Type::Primitive(Primitive::Float);
    pub const DOUBLE: Type = Type::Primitive(Primitive::Double);
    pub const BOOL: Type = Type::Primitive(Primitive::Bool);
    pub const STRING: Type = Type::Primitive(Primitive::String);

    /// Shorthand for [`FunctionType::new`] wrapped in a [`Type`].
    pub fn function(parameters: Vec<Type>, return_type: Type) -> Self {
        Type::Function(FunctionType::new(parameters, return_type))
    }

    /// Returns the canonical name of the type.
    pub fn name(&self) -> &str {
        match self {
            Type::Primitive(primitive) => primitive.name(),
            Type::Function(function) => function.name(),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Primitive(Primitive::Void))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_))
    }
}

// Identity is the canonical name, not the structure it was built from.
impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Type {}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A numeric literal value together with its concrete subtype.
///
/// The subtype is chosen by the lexer from the literal's spelling; the parser
/// never coerces between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    /// Returns the primitive type this literal belongs to.
    pub fn primitive(&self) -> Primitive {
        match self {
            Number::Integer(_) => Primitive::Integer,
            Number::Long(_) => Primitive::Long,
            Number::Float(_) => Primitive::Float,
            Number::Double(_) => Primitive::Double,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Long(value) => write!(f, "{}L", value),
            Number::Float(value) => write!(f, "{}f", value),
            Number::Double(value) => write!(f, "{}", value),
        }
    }
}
