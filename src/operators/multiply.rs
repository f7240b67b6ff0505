//! Multiplication operator implementation

use super::helpers::merge_nullable;
use super::traits::BinaryOperator;
use crate::error::{Error, Result};
use crate::types::{DataType, Value};

pub struct MultiplyOperator;

impl BinaryOperator for MultiplyOperator {
    fn name(&self) -> &'static str {
        "multiplication"
    }

    fn symbol(&self) -> &'static str {
        "*"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        if let Some(other) = merge_nullable(left, right) {
            return Ok(other.clone());
        }
        match (left, right) {
            (DataType::Numeric, DataType::Numeric) => Ok(DataType::Numeric),
            _ => Err(Error::TypeMismatch {
                expected: "numeric".into(),
                found: format!("{} * {}", left, right),
            }),
        }
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        match (left, right) {
            (Value::Numeric(a), Value::Numeric(b)) => Ok(Value::Numeric(a.multiply(b)?)),
            _ if left.is_null() || right.is_null() => Ok(Value::Null),
            _ => Err(Error::TypeMismatch {
                expected: "numeric".into(),
                found: format!("{} * {}", left.data_type(), right.data_type()),
            }),
        }
    }
}
