use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
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

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UndefinedSymbol { .. } => "UndefinedSymbol",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunction",
            ErrorImpl::MalformedParameterList => "MalformedParameterList",
            ErrorImpl::NonBooleanCondition { .. } => "NonBooleanCondition",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::UndefinedOperator { .. } => "UndefinedOperator",
            ErrorImpl::InvalidCast { .. } => "InvalidCast",
            ErrorImpl::InvalidModule { .. } => "InvalidModule",
            ErrorImpl::VoidParameter { .. } => "VoidParameter",
            ErrorImpl::InvalidTarget { .. } => "InvalidTarget",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UndefinedSymbol { symbol } => {
                ErrorTip::Suggestion(format!("Declare `{}` before using it", symbol))
            }
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` takes {} arguments, {} were given",
                function, expected, received
            )),
            ErrorImpl::UndefinedFunction { .. } => ErrorTip::None,
            ErrorImpl::MalformedParameterList => ErrorTip::Suggestion(String::from(
                "Parameters are written as `type name`",
            )),
            ErrorImpl::NonBooleanCondition { .. } => ErrorTip::Suggestion(String::from(
                "Compare the value explicitly, e.g. `x != 0`",
            )),
            ErrorImpl::UnknownType { .. } => ErrorTip::None,
            ErrorImpl::UndefinedOperator { .. } => ErrorTip::None,
            ErrorImpl::InvalidCast { .. } => ErrorTip::None,
            ErrorImpl::InvalidModule { .. } => ErrorTip::None,
            ErrorImpl::VoidParameter { parameter } => ErrorTip::Suggestion(format!(
                "Give `{}` a value type or remove it",
                parameter
            )),
            ErrorImpl::InvalidTarget { .. } => ErrorTip::Suggestion(String::from(
                "Only variables can be assigned, incremented or decremented",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
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
    #[error("symbol {symbol:?} is undefined")]
    UndefinedSymbol { symbol: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("{function:?} expects {expected} arguments, received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("function {function:?} is undefined")]
    UndefinedFunction { function: String },
    #[error("non-parameter in function parameters")]
    MalformedParameterList,
    #[error("condition must be a boolean, received {received:?}")]
    NonBooleanCondition { received: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("operator {operator:?} is not defined for {operand:?}")]
    UndefinedOperator { operator: String, operand: String },
    #[error("cannot cast {from:?} to {to:?}")]
    InvalidCast { from: String, to: String },
    #[error("generated module is invalid: {message}")]
    InvalidModule { message: String },
    #[error("parameter {parameter:?} cannot have type void")]
    VoidParameter { parameter: String },
    #[error("{received} is not a variable")]
    InvalidTarget { received: String },
}

/// Receives errors at the point where the checker detects them.
///
/// The checker never stops after a report; whoever implements this decides
/// what to do with the error.
pub trait Reporter {
    fn report(&mut self, error: Error);
}

impl Reporter for Vec<Error> {
    fn report(&mut self, error: Error) {
        self.push(error);
    }
}
