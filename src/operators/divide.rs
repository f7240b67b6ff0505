//! Division operator implementation
//!
//! Division by a zero numeric operand is the domain value `NotANumber`,
//! never an error and never null — the zero check comes before null
//! propagation.

use super::helpers::merge_nullable;
use super::traits::BinaryOperator;
use crate::error::{Error, Result};
use crate::types::{DataType, Numeric, Value};

pub struct DivideOperator;

impl BinaryOperator for DivideOperator {
    fn name(&self) -> &'static str {
        "division"
    }

    fn symbol(&self) -> &'static str {
        "/"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        if let Some(other) = merge_nullable(left, right) {
            return Ok(other.clone());
        }
        match (left, right) {
            (DataType::Numeric, DataType::Numeric) => Ok(DataType::Numeric),
            _ => Err(Error::TypeMismatch {
                expected: "numeric".into(),
                found: format!("{} / {}", left, right),
            }),
        }
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        match (left, right) {
            (Value::Numeric(a), Value::Numeric(b)) => Ok(Value::Numeric(a.divide(b)?)),
            (_, Value::Numeric(b)) if b.is_zero() && left.is_null() => {
                Ok(Value::Numeric(Numeric::nan()))
            }
            _ if left.is_null() || right.is_null() => Ok(Value::Null),
            _ => Err(Error::TypeMismatch {
                expected: "numeric".into(),
                found: format!("{} / {}", left.data_type(), right.data_type()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide() {
        let op = DivideOperator;
        // decimal division, not truncating
        assert_eq!(
            op.execute(&Value::integer(5), &Value::integer(2)).unwrap(),
            Value::Numeric(Numeric::try_parse("2.5").unwrap())
        );
        assert_eq!(
            op.execute(&Value::Null, &Value::integer(2)).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_divide_by_zero_is_nan() {
        let op = DivideOperator;
        let out = op.execute(&Value::integer(5), &Value::integer(0)).unwrap();
        assert_eq!(out, Value::Numeric(Numeric::nan()));
        // never null, even with a null dividend
        let out = op.execute(&Value::Null, &Value::integer(0)).unwrap();
        assert_eq!(out, Value::Numeric(Numeric::nan()));
    }
}
