//! Value-algebra operator implementations
//!
//! One module per operator behind a shared trait pair, with front-door
//! functions so callers never hold operator instances. The reduction
//! engine dispatches through [`execute_binary`]/[`execute_unary`] keyed
//! by the operator enums.

pub mod helpers;
pub mod like;
pub mod traits;

// Arithmetic operators
mod add;
mod divide;
mod multiply;
mod remainder;
mod subtract;

// Comparison operators
mod equal;
mod greater_than;
mod greater_than_equal;
mod is;
mod less_than;
mod less_than_equal;
mod not_equal;

// Logical operators
mod and;
mod not;
mod or;
mod xor;

// Unary operators
mod identity;
mod negate;

pub use traits::{BinaryOperator, UnaryOperator};

use crate::error::{Error, Result};
use crate::types::{DataType, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The closed set of binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    XOr,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Is,
    IsNot,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            And => "AND",
            Or => "OR",
            XOr => "XOR",
            Equal => "=",
            NotEqual => "<>",
            GreaterThan => ">",
            GreaterThanOrEqual => ">=",
            LessThan => "<",
            LessThanOrEqual => "<=",
            Is => "IS",
            IsNot => "IS NOT",
        }
    }

    /// Relational, equality and IS operators — the set a quantifier
    /// accepts.
    pub fn is_comparison(&self) -> bool {
        use BinaryOp::*;
        matches!(
            self,
            Equal
                | NotEqual
                | GreaterThan
                | GreaterThanOrEqual
                | LessThan
                | LessThanOrEqual
                | Is
                | IsNot
        )
    }

    pub fn is_arithmetic(&self) -> bool {
        use BinaryOp::*;
        matches!(self, Add | Subtract | Multiply | Divide | Modulo)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::XOr)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The closed set of unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Plus,
    Negate,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Negate => "-",
            UnaryOp::Not => "NOT",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Execute a binary operation
pub fn execute_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    binary_operator(op).execute(left, right)
}

/// Validate binary operand types and return the result type
pub fn validate_binary(op: BinaryOp, left: &DataType, right: &DataType) -> Result<DataType> {
    binary_operator(op).validate(left, right)
}

/// Execute a unary operation
pub fn execute_unary(op: UnaryOp, operand: &Value) -> Result<Value> {
    unary_operator(op).execute(operand)
}

/// Validate a unary operand type and return the result type
pub fn validate_unary(op: UnaryOp, operand: &DataType) -> Result<DataType> {
    unary_operator(op).validate(operand)
}

fn binary_operator(op: BinaryOp) -> &'static dyn BinaryOperator {
    static ADD: add::AddOperator = add::AddOperator;
    static SUBTRACT: subtract::SubtractOperator = subtract::SubtractOperator;
    static MULTIPLY: multiply::MultiplyOperator = multiply::MultiplyOperator;
    static DIVIDE: divide::DivideOperator = divide::DivideOperator;
    static REMAINDER: remainder::RemainderOperator = remainder::RemainderOperator;
    static AND: and::AndOperator = and::AndOperator;
    static OR: or::OrOperator = or::OrOperator;
    static XOR: xor::XorOperator = xor::XorOperator;
    static EQUAL: equal::EqualOperator = equal::EqualOperator;
    static NOT_EQUAL: not_equal::NotEqualOperator = not_equal::NotEqualOperator;
    static GREATER_THAN: greater_than::GreaterThanOperator = greater_than::GreaterThanOperator;
    static GREATER_THAN_EQUAL: greater_than_equal::GreaterThanEqualOperator =
        greater_than_equal::GreaterThanEqualOperator;
    static LESS_THAN: less_than::LessThanOperator = less_than::LessThanOperator;
    static LESS_THAN_EQUAL: less_than_equal::LessThanEqualOperator =
        less_than_equal::LessThanEqualOperator;
    static IS: is::IsOperator = is::IsOperator;
    static IS_NOT: is::IsNotOperator = is::IsNotOperator;

    match op {
        BinaryOp::Add => &ADD,
        BinaryOp::Subtract => &SUBTRACT,
        BinaryOp::Multiply => &MULTIPLY,
        BinaryOp::Divide => &DIVIDE,
        BinaryOp::Modulo => &REMAINDER,
        BinaryOp::And => &AND,
        BinaryOp::Or => &OR,
        BinaryOp::XOr => &XOR,
        BinaryOp::Equal => &EQUAL,
        BinaryOp::NotEqual => &NOT_EQUAL,
        BinaryOp::GreaterThan => &GREATER_THAN,
        BinaryOp::GreaterThanOrEqual => &GREATER_THAN_EQUAL,
        BinaryOp::LessThan => &LESS_THAN,
        BinaryOp::LessThanOrEqual => &LESS_THAN_EQUAL,
        BinaryOp::Is => &IS,
        BinaryOp::IsNot => &IS_NOT,
    }
}

fn unary_operator(op: UnaryOp) -> &'static dyn UnaryOperator {
    static PLUS: identity::IdentityOperator = identity::IdentityOperator;
    static NEGATE: negate::NegateOperator = negate::NegateOperator;
    static NOT: not::NotOperator = not::NotOperator;

    match op {
        UnaryOp::Plus => &PLUS,
        UnaryOp::Negate => &NEGATE,
        UnaryOp::Not => &NOT,
    }
}

/// Ordering of two non-null values.
///
/// Kinds must be compatible: matching kinds, boolean against numeric
/// zero/one, or opaque values of one type name. Anything else is an
/// error — comparisons never silently answer false across kinds.
pub fn compare(left: &Value, right: &Value) -> Result<Ordering> {
    use Value::*;
    let incomparable = || Error::NotComparable {
        left: left.data_type().to_string(),
        right: right.data_type().to_string(),
    };
    match (left, right) {
        (Numeric(a), Numeric(b)) => a.compare(b).ok_or_else(incomparable),
        (Boolean(Some(a)), Boolean(Some(b))) => Ok(a.cmp(b)),
        (Boolean(Some(b)), Numeric(n)) => crate::types::Numeric::from_bool(*b)
            .compare(n)
            .ok_or_else(incomparable),
        (Numeric(n), Boolean(Some(b))) => n
            .compare(&crate::types::Numeric::from_bool(*b))
            .ok_or_else(incomparable),
        (String(a), String(b)) => a.compare(b).ok_or_else(incomparable),
        (DateTime(Some(a)), DateTime(Some(b))) => Ok(a.cmp(b)),
        (DaySecond(Some(a)), DaySecond(Some(b))) => Ok(a.cmp(b)),
        (YearMonth(Some(a)), YearMonth(Some(b))) => Ok(a.cmp(b)),
        (Binary(a), Binary(b)) => a.compare(b).ok_or_else(incomparable),
        (Opaque(a), Opaque(b)) if a.type_name == b.type_name => match (&a.text, &b.text) {
            (Some(x), Some(y)) => Ok(x.cmp(y)),
            _ => Err(incomparable()),
        },
        _ => Err(incomparable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Numeric;

    #[test]
    fn test_compare_special_states() {
        let nan = Value::Numeric(Numeric::nan());
        let inf = Value::Numeric(Numeric::positive_infinity());
        assert_eq!(compare(&Value::integer(0), &nan).unwrap(), Ordering::Less);
        assert_eq!(compare(&inf, &nan).unwrap(), Ordering::Less);
        assert_eq!(
            compare(&Value::Numeric(Numeric::negative_infinity()), &inf).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_incomparable_is_error() {
        assert!(compare(&Value::string("1"), &Value::integer(1)).is_err());
        assert!(compare(&Value::Tabular(None), &Value::Tabular(None)).is_err());
    }

    #[test]
    fn test_dispatch() {
        assert_eq!(
            execute_binary(BinaryOp::Add, &Value::integer(2), &Value::integer(2)).unwrap(),
            Value::integer(4)
        );
        assert_eq!(
            execute_unary(UnaryOp::Not, &Value::boolean(true)).unwrap(),
            Value::boolean(false)
        );
        assert_eq!(
            validate_binary(BinaryOp::And, &DataType::Boolean, &DataType::Null).unwrap(),
            DataType::Boolean
        );
    }
}
