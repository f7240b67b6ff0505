//! Remainder operator implementation
//!
//! Modulo by zero yields `NotANumber`, like division.

use super::helpers::merge_nullable;
use super::traits::BinaryOperator;
use crate::error::{Error, Result};
use crate::types::{DataType, Numeric, Value};

pub struct RemainderOperator;

impl BinaryOperator for RemainderOperator {
    fn name(&self) -> &'static str {
        "remainder"
    }

    fn symbol(&self) -> &'static str {
        "%"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        if let Some(other) = merge_nullable(left, right) {
            return Ok(other.clone());
        }
        match (left, right) {
            (DataType::Numeric, DataType::Numeric) => Ok(DataType::Numeric),
            _ => Err(Error::TypeMismatch {
                expected: "numeric".into(),
                found: format!("{} % {}", left, right),
            }),
        }
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        match (left, right) {
            (Value::Numeric(a), Value::Numeric(b)) => Ok(Value::Numeric(a.remainder(b)?)),
            (_, Value::Numeric(b)) if b.is_zero() && left.is_null() => {
                Ok(Value::Numeric(Numeric::nan()))
            }
            _ if left.is_null() || right.is_null() => Ok(Value::Null),
            _ => Err(Error::TypeMismatch {
                expected: "numeric".into(),
                found: format!("{} % {}", left.data_type(), right.data_type()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder() {
        let op = RemainderOperator;
        assert_eq!(
            op.execute(&Value::integer(7), &Value::integer(3)).unwrap(),
            Value::integer(1)
        );
        assert_eq!(
            op.execute(&Value::integer(7), &Value::integer(0)).unwrap(),
            Value::Numeric(Numeric::nan())
        );
    }
}
