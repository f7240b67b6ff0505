//! Logical AND operator implementation
//!
//! The connectives here are strictly null-propagating: any null operand
//! makes the result null. The Kleene identity `FALSE AND NULL = FALSE`
//! is deliberately not applied; both operands' null state is always
//! consulted.

use super::helpers::validate_logical;
use super::traits::BinaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};

pub struct AndOperator;

impl BinaryOperator for AndOperator {
    fn name(&self) -> &'static str {
        "logical AND"
    }

    fn symbol(&self) -> &'static str {
        "AND"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_logical(left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        match (left.as_truth()?, right.as_truth()?) {
            (Some(a), Some(b)) => Ok(Value::boolean(a && b)),
            _ => Ok(Value::Null),
        }
    }
}
