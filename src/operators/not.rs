//! Logical NOT operator implementation

use super::helpers::validate_logical_operand;
use super::traits::UnaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};

pub struct NotOperator;

impl UnaryOperator for NotOperator {
    fn name(&self) -> &'static str {
        "logical NOT"
    }

    fn symbol(&self) -> &'static str {
        "NOT"
    }

    fn validate(&self, operand: &DataType) -> Result<DataType> {
        validate_logical_operand(operand)
    }

    fn execute(&self, operand: &Value) -> Result<Value> {
        match operand.as_truth()? {
            Some(b) => Ok(Value::boolean(!b)),
            None => Ok(Value::Null),
        }
    }
}
