//! Unary plus operator implementation

use super::traits::UnaryOperator;
use crate::error::{Error, Result};
use crate::types::{DataType, Value};

pub struct IdentityOperator;

impl UnaryOperator for IdentityOperator {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn symbol(&self) -> &'static str {
        "+"
    }

    fn validate(&self, operand: &DataType) -> Result<DataType> {
        match operand {
            DataType::Null
            | DataType::Numeric
            | DataType::DaySecondInterval
            | DataType::YearMonthInterval => Ok(operand.clone()),
            other => Err(Error::TypeMismatch {
                expected: "numeric or interval".into(),
                found: other.to_string(),
            }),
        }
    }

    fn execute(&self, operand: &Value) -> Result<Value> {
        match operand {
            Value::Numeric(_) | Value::DaySecond(_) | Value::YearMonth(_) => Ok(operand.clone()),
            _ if operand.is_null() => Ok(Value::Null),
            other => Err(Error::TypeMismatch {
                expected: "numeric or interval".into(),
                found: other.data_type().to_string(),
            }),
        }
    }
}
