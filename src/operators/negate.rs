//! Arithmetic negation operator implementation

use super::traits::UnaryOperator;
use crate::error::{Error, Result};
use crate::types::{DataType, Value};

pub struct NegateOperator;

impl UnaryOperator for NegateOperator {
    fn name(&self) -> &'static str {
        "negation"
    }

    fn symbol(&self) -> &'static str {
        "-"
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
            Value::Numeric(n) => Ok(Value::Numeric(n.negate()?)),
            _ if operand.is_null() => Ok(Value::Null),
            Value::DaySecond(Some(iv)) => Ok(Value::DaySecond(Some(iv.negate()?))),
            Value::YearMonth(Some(iv)) => Ok(Value::YearMonth(Some(iv.negate()?))),
            other => Err(Error::TypeMismatch {
                expected: "numeric or interval".into(),
                found: other.data_type().to_string(),
            }),
        }
    }
}
