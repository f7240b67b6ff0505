//! Error types for the expression engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Type errors
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Values of type {left} and {right} are not comparable")]
    NotComparable { left: String, right: String },

    #[error("Cannot cast {from} to {to}")]
    InvalidCast { from: String, to: String },

    // Construction errors
    #[error("Operator {0} cannot be used in a quantified comparison")]
    InvalidQuantifierOperator(String),

    // Reduction errors
    #[error("Expression did not reduce to a constant: {0}")]
    NotConstant(String),

    #[error("No resolution context is available")]
    NoContext,

    #[error("No {0} service is configured in the resolution context")]
    ServiceNotConfigured(&'static str),

    #[error("Function not found: {0}")]
    FunctionNotFound(String),

    #[error("Ambiguous function call: {0}")]
    AmbiguousFunction(String),

    #[error("{0} is not a function")]
    NotAFunction(String),

    #[error("Argument mismatch calling {function}: {reason}")]
    ArgumentMismatch { function: String, reason: String },

    #[error("Pattern escape must be exactly one character, found {0:?}")]
    InvalidEscape(String),

    #[error("Condition test must be boolean, found {0}")]
    ConditionNotBoolean(String),

    #[error("Type of parameter ?{0} is unknown outside a binding context")]
    UntypedParameter(usize),

    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
