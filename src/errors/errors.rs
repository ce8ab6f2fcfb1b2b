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

    /// Creates an error that has no meaningful source position.
    ///
    /// The checker, transformer and interpreter work on a position-free AST,
    /// so their errors are reported this way.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl, Position::null())
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "SyntaxError",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::MissingMain => "MissingMain",
            ErrorImpl::DuplicateMain => "DuplicateMain",
            ErrorImpl::UndeclaredVariable { .. } => "UndeclaredVariable",
            ErrorImpl::UndeclaredFunction { .. } => "UndeclaredFunction",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::UndefinedValue { .. } => "UndefinedValue",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::InvalidConversion { .. } => "InvalidConversion",
            ErrorImpl::Internal { .. } => "InternalError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {}, saw `{}`",
                expected, found
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateDeclaration { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::MissingMain => {
                ErrorTip::Suggestion(String::from("Every program needs a `main` function"))
            }
            ErrorImpl::DuplicateMain => {
                ErrorTip::Suggestion(String::from("Only one function may be named `main`"))
            }
            ErrorImpl::UndeclaredVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::UndeclaredFunction { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::TypeMismatch { context, expected, received } => {
                ErrorTip::Suggestion(format!(
                    "In {}: expected `{}`, received `{}`",
                    context, expected, received
                ))
            }
            ErrorImpl::ArgumentCountMismatch { function, expected, received } => {
                ErrorTip::Suggestion(format!(
                    "`{}` takes {} arguments, received {}",
                    function, expected, received
                ))
            }
            ErrorImpl::UndefinedValue { what } => {
                ErrorTip::Suggestion(format!("{} is read before it is given a value", what))
            }
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::InvalidConversion { value } => {
                ErrorTip::Suggestion(format!("{} is not a valid character code", value))
            }
            ErrorImpl::Internal { message } => ErrorTip::Suggestion(format!(
                "This is a bug in the interpreter: {}",
                message
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
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
    #[error("syntax error: expecting {expected}; saw {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("duplicate declaration: {name:?}")]
    DuplicateDeclaration { name: String },
    #[error("no function named main")]
    MissingMain,
    #[error("more than one function named main")]
    DuplicateMain,
    #[error("undeclared variable: {variable:?}")]
    UndeclaredVariable { variable: String },
    #[error("undeclared function: {function:?}")]
    UndeclaredFunction { function: String },
    #[error("type error in {context}: expected {expected}, received {received}")]
    TypeMismatch { context: String, expected: String, received: String },
    #[error("call to {function:?}: expected {expected} arguments, received {received}")]
    ArgumentCountMismatch { function: String, expected: usize, received: usize },
    #[error("reference to undefined value: {what}")]
    UndefinedValue { what: String },
    #[error("integer division by zero")]
    DivisionByZero,
    #[error("invalid conversion of {value} to char")]
    InvalidConversion { value: i32 },
    #[error("internal error: {message}")]
    Internal { message: String },
}
