//! Less-than comparison operator implementation

use super::helpers::validate_comparison;
use super::traits::BinaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};
use std::cmp::Ordering;

pub struct LessThanOperator;

impl BinaryOperator for LessThanOperator {
    fn name(&self) -> &'static str {
        "less-than"
    }

    fn symbol(&self) -> &'static str {
        "<"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_comparison(left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        if left.is_null() || right.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::boolean(
            super::compare(left, right)? == Ordering::Less,
        ))
    }
}
