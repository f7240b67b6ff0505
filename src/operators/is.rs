//! IS / IS NOT operator implementations
//!
//! Unlike the ordinary comparisons, IS treats null as a value: two nulls
//! are the same, a null and a non-null are not, and the result is never
//! null.

use super::helpers::validate_comparison;
use super::traits::BinaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};
use std::cmp::Ordering;

pub struct IsOperator;
pub struct IsNotOperator;

fn is_same(left: &Value, right: &Value) -> Result<bool> {
    match (left.is_null(), right.is_null()) {
        (true, true) => Ok(true),
        (true, false) | (false, true) => Ok(false),
        (false, false) => Ok(super::compare(left, right)? == Ordering::Equal),
    }
}

impl BinaryOperator for IsOperator {
    fn name(&self) -> &'static str {
        "IS comparison"
    }

    fn symbol(&self) -> &'static str {
        "IS"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_comparison(left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::boolean(is_same(left, right)?))
    }
}

impl BinaryOperator for IsNotOperator {
    fn name(&self) -> &'static str {
        "IS NOT comparison"
    }

    fn symbol(&self) -> &'static str {
        "IS NOT"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_comparison(left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::boolean(!is_same(left, right)?))
    }
}
