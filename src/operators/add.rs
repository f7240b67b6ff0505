//! Addition operator implementation

use super::helpers::merge_nullable;
use super::traits::BinaryOperator;
use crate::error::{Error, Result};
use crate::types::temporal::{datetime_add_day_second, datetime_add_year_month};
use crate::types::{DataType, Value};

pub struct AddOperator;

impl BinaryOperator for AddOperator {
    fn name(&self) -> &'static str {
        "addition"
    }

    fn symbol(&self) -> &'static str {
        "+"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        use DataType::*;
        if let Some(other) = merge_nullable(left, right) {
            return Ok(other.clone());
        }
        match (left, right) {
            (Numeric, Numeric) => Ok(Numeric),
            // `+` concatenates strings
            (String, String) => Ok(String),
            (DateTime, DaySecondInterval) | (DaySecondInterval, DateTime) => Ok(DateTime),
            (DateTime, YearMonthInterval) | (YearMonthInterval, DateTime) => Ok(DateTime),
            (DaySecondInterval, DaySecondInterval) => Ok(DaySecondInterval),
            (YearMonthInterval, YearMonthInterval) => Ok(YearMonthInterval),
            _ => Err(Error::TypeMismatch {
                expected: "numeric, string, or date-time with interval".into(),
                found: format!("{} + {}", left, right),
            }),
        }
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        use Value::*;
        match (left, right) {
            (Numeric(a), Numeric(b)) => Ok(Numeric(a.add(b)?)),
            (String(a), String(b)) => Ok(String(a.concat(b))),
            _ if left.is_null() || right.is_null() => Ok(Null),
            (DateTime(Some(ts)), DaySecond(Some(iv)))
            | (DaySecond(Some(iv)), DateTime(Some(ts))) => {
                Ok(DateTime(Some(datetime_add_day_second(*ts, iv)?)))
            }
            (DateTime(Some(ts)), YearMonth(Some(iv)))
            | (YearMonth(Some(iv)), DateTime(Some(ts))) => {
                Ok(DateTime(Some(datetime_add_year_month(*ts, iv)?)))
            }
            (DaySecond(Some(a)), DaySecond(Some(b))) => Ok(DaySecond(Some(a.add(b)?))),
            (YearMonth(Some(a)), YearMonth(Some(b))) => Ok(YearMonth(Some(a.add(b)?))),
            _ => Err(Error::TypeMismatch {
                expected: "numeric, string, or date-time with interval".into(),
                found: format!("{} + {}", left.data_type(), right.data_type()),
            }),
        }
    }
}
