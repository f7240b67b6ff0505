//! Logical XOR operator implementation

use super::helpers::validate_logical;
use super::traits::BinaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};

pub struct XorOperator;

impl BinaryOperator for XorOperator {
    fn name(&self) -> &'static str {
        "logical XOR"
    }

    fn symbol(&self) -> &'static str {
        "XOR"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_logical(left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        match (left.as_truth()?, right.as_truth()?) {
            (Some(a), Some(b)) => Ok(Value::boolean(a != b)),
            _ => Ok(Value::Null),
        }
    }
}
