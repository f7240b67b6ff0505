//! Logical OR operator implementation
//!
//! Strictly null-propagating, like AND: `TRUE OR NULL` is null here, not
//! true.

use super::helpers::validate_logical;
use super::traits::BinaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};

pub struct OrOperator;

impl BinaryOperator for OrOperator {
    fn name(&self) -> &'static str {
        "logical OR"
    }

    fn symbol(&self) -> &'static str {
        "OR"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_logical(left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        match (left.as_truth()?, right.as_truth()?) {
            (Some(a), Some(b)) => Ok(Value::boolean(a || b)),
            _ => Ok(Value::Null),
        }
    }
}
