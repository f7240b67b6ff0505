//! Equality comparison operator implementation

use super::helpers::validate_comparison;
use super::traits::BinaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};
use std::cmp::Ordering;

pub struct EqualOperator;

impl BinaryOperator for EqualOperator {
    fn name(&self) -> &'static str {
        "equality"
    }

    fn symbol(&self) -> &'static str {
        "="
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_comparison(left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        if left.is_null() || right.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::boolean(
            super::compare(left, right)? == Ordering::Equal,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal() {
        let op = EqualOperator;
        assert_eq!(
            op.execute(&Value::integer(3), &Value::integer(3)).unwrap(),
            Value::boolean(true)
        );
        assert_eq!(
            op.execute(&Value::integer(3), &Value::Null).unwrap(),
            Value::Null
        );
        // boolean compares against numeric zero/one
        assert_eq!(
            op.execute(&Value::boolean(true), &Value::integer(1))
                .unwrap(),
            Value::boolean(true)
        );
        // incomparable kinds are an error, not false
        assert!(op.execute(&Value::string("3"), &Value::integer(3)).is_err());
    }
}
