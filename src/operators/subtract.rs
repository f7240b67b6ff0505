//! Subtraction operator implementation

use super::helpers::merge_nullable;
use super::traits::BinaryOperator;
use crate::error::{Error, Result};
use crate::types::temporal::{
    datetime_difference, datetime_sub_day_second, datetime_sub_year_month,
};
use crate::types::{DataType, Value};

pub struct SubtractOperator;

impl BinaryOperator for SubtractOperator {
    fn name(&self) -> &'static str {
        "subtraction"
    }

    fn symbol(&self) -> &'static str {
        "-"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        use DataType::*;
        if let Some(other) = merge_nullable(left, right) {
            return Ok(other.clone());
        }
        match (left, right) {
            (Numeric, Numeric) => Ok(Numeric),
            (DateTime, DaySecondInterval) => Ok(DateTime),
            (DateTime, YearMonthInterval) => Ok(DateTime),
            (DateTime, DateTime) => Ok(DaySecondInterval),
            (DaySecondInterval, DaySecondInterval) => Ok(DaySecondInterval),
            (YearMonthInterval, YearMonthInterval) => Ok(YearMonthInterval),
            _ => Err(Error::TypeMismatch {
                expected: "numeric or date-time types".into(),
                found: format!("{} - {}", left, right),
            }),
        }
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        use Value::*;
        match (left, right) {
            (Numeric(a), Numeric(b)) => Ok(Numeric(a.subtract(b)?)),
            _ if left.is_null() || right.is_null() => Ok(Null),
            (DateTime(Some(ts)), DaySecond(Some(iv))) => {
                Ok(DateTime(Some(datetime_sub_day_second(*ts, iv)?)))
            }
            (DateTime(Some(ts)), YearMonth(Some(iv))) => {
                Ok(DateTime(Some(datetime_sub_year_month(*ts, iv)?)))
            }
            (DateTime(Some(a)), DateTime(Some(b))) => {
                Ok(DaySecond(Some(datetime_difference(*a, *b)?)))
            }
            (DaySecond(Some(a)), DaySecond(Some(b))) => Ok(DaySecond(Some(a.subtract(b)?))),
            (YearMonth(Some(a)), YearMonth(Some(b))) => Ok(YearMonth(Some(a.subtract(b)?))),
            _ => Err(Error::TypeMismatch {
                expected: "numeric or date-time types".into(),
                found: format!("{} - {}", left.data_type(), right.data_type()),
            }),
        }
    }
}
