use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Returns true for errors raised while tokenizing, before parsing starts.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnterminatedString
                | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedTokenAtLeaf { .. } => "UnexpectedTokenAtLeaf",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::EmptyBranch => "EmptyBranch",
            ErrorImpl::EmptyLoop => "EmptyLoop",
            ErrorImpl::UnsupportedType { .. } => "UnsupportedType",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, does it fit its numeric type?",
                token
            )),
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedTokenAtLeaf { token } => ErrorTip::Suggestion(format!(
                "Unexpected token at leaf: `{}`, expected a literal, variable or `(`",
                token
            )),
            ErrorImpl::MissingReturn { function, return_type } => ErrorTip::Suggestion(format!(
                "Function `{}` returns `{}` but has no return statement",
                function, return_type
            )),
            ErrorImpl::EmptyBranch => {
                ErrorTip::Suggestion(String::from("Empty if branch is not allowed"))
            }
            ErrorImpl::EmptyLoop => ErrorTip::Suggestion(String::from("Empty loop is not allowed")),
            ErrorImpl::UnsupportedType { token } => {
                ErrorTip::Suggestion(format!("Type cannot start with `{}`", token))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error, self.position.1, self.position.0
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected token at leaf: {token:?}")]
    UnexpectedTokenAtLeaf { token: String },
    #[error("function {function:?} of type {return_type} is missing a return statement")]
    MissingReturn { function: String, return_type: String },
    #[error("empty if branch")]
    EmptyBranch,
    #[error("empty loop body")]
    EmptyLoop,
    #[error("unsupported type starting at {token:?}")]
    UnsupportedType { token: String },
}
