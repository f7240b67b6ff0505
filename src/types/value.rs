//! The scalar value algebra
//!
//! One tagged union over every SQL value kind. Null is a first-class
//! state of each kind (the payload carries it) and `Value::Null` is the
//! universal null produced by reduction when data is absent.

use crate::error::{Error, Result};
use crate::expr::node::Expression;
use crate::types::data_type::DataType;
use crate::types::numeric::Numeric;
use crate::types::temporal::{
    format_datetime, parse_datetime, DaySecondInterval, YearMonthInterval,
};
use crate::types::text::{BinaryValue, StringValue};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The universal null.
    Null,
    Boolean(Option<bool>),
    Numeric(Numeric),
    String(StringValue),
    DateTime(Option<NaiveDateTime>),
    DaySecond(Option<DaySecondInterval>),
    YearMonth(Option<YearMonthInterval>),
    Binary(BinaryValue),
    Array(Option<ArrayValue>),
    Opaque(OpaqueValue),
    Tabular(Option<TabularValue>),
}

/// A finite, fixed-length sequence of expressions. Elements are reduced
/// lazily, one slot at a time, by the quantifier.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    elements: Vec<Expression>,
}

impl ArrayValue {
    pub fn new(elements: Vec<Expression>) -> ArrayValue {
        ArrayValue { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Expression] {
        &self.elements
    }
}

/// A user-defined value the engine carries without interpreting. Two
/// opaque values are comparable only within the same type name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpaqueValue {
    pub type_name: String,
    /// Rendered payload; `None` is the null of this kind.
    pub text: Option<String>,
}

/// A tabular value wraps the plan of the query that produces it. It is
/// not independently comparable; row production belongs to the executor.
#[derive(Clone, Debug, PartialEq)]
pub struct TabularValue {
    pub plan: QueryPlan,
}

/// Plan descriptor for a tabular query: the canonical statement text and
/// its output columns. The physical plan lives outside this engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryPlan {
    pub statement: String,
    pub columns: Vec<String>,
}

impl Value {
    pub fn boolean(value: bool) -> Value {
        Value::Boolean(Some(value))
    }

    pub fn integer(value: i64) -> Value {
        Value::Numeric(Numeric::from_i64(value))
    }

    pub fn numeric(value: Numeric) -> Value {
        Value::Numeric(value)
    }

    pub fn string(value: impl Into<String>) -> Value {
        Value::String(StringValue::new(value))
    }

    pub fn binary(value: impl Into<Vec<u8>>) -> Value {
        Value::Binary(BinaryValue::new(value))
    }

    pub fn datetime(value: NaiveDateTime) -> Value {
        Value::DateTime(Some(value))
    }

    pub fn array(elements: Vec<Expression>) -> Value {
        Value::Array(Some(ArrayValue::new(elements)))
    }

    /// The null of a given kind.
    pub fn null_of(target: &DataType) -> Value {
        match target {
            DataType::Null => Value::Null,
            DataType::Boolean => Value::Boolean(None),
            DataType::Numeric => Value::Numeric(Numeric::null()),
            DataType::String => Value::String(StringValue::Null),
            DataType::DateTime => Value::DateTime(None),
            DataType::DaySecondInterval => Value::DaySecond(None),
            DataType::YearMonthInterval => Value::YearMonth(None),
            DataType::Binary => Value::Binary(BinaryValue::Null),
            DataType::Array => Value::Array(None),
            DataType::Opaque(name) => Value::Opaque(OpaqueValue {
                type_name: name.clone(),
                text: None,
            }),
            DataType::Tabular => Value::Tabular(None),
        }
    }

    /// Null covers the universal null and the null state of every kind.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(b) => b.is_none(),
            Value::Numeric(n) => n.is_null(),
            Value::String(s) => s.is_null(),
            Value::DateTime(d) => d.is_none(),
            Value::DaySecond(i) => i.is_none(),
            Value::YearMonth(i) => i.is_none(),
            Value::Binary(b) => b.is_null(),
            Value::Array(a) => a.is_none(),
            Value::Opaque(o) => o.text.is_none(),
            Value::Tabular(t) => t.is_none(),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Null,
            Value::Boolean(_) => DataType::Boolean,
            Value::Numeric(_) => DataType::Numeric,
            Value::String(_) => DataType::String,
            Value::DateTime(_) => DataType::DateTime,
            Value::DaySecond(_) => DataType::DaySecondInterval,
            Value::YearMonth(_) => DataType::YearMonthInterval,
            Value::Binary(_) => DataType::Binary,
            Value::Array(_) => DataType::Array,
            Value::Opaque(o) => DataType::Opaque(o.type_name.clone()),
            Value::Tabular(_) => DataType::Tabular,
        }
    }

    /// Kind-level comparability; see [`DataType::is_comparable_to`].
    pub fn is_comparable_to(&self, other: &Value) -> bool {
        self.data_type().is_comparable_to(&other.data_type())
    }

    /// The tri-state truth of a boolean-typed value. The universal null
    /// reads as unknown; anything non-boolean is a type error.
    pub fn as_truth(&self) -> Result<Option<bool>> {
        match self {
            Value::Boolean(b) => Ok(*b),
            Value::Null => Ok(None),
            other => Err(Error::TypeMismatch {
                expected: "BOOLEAN".into(),
                found: other.data_type().to_string(),
            }),
        }
    }

    /// The materialized text of a string-typed value; `None` for nulls.
    pub fn as_string(&self) -> Result<Option<String>> {
        match self {
            Value::String(s) => Ok(s.to_text()),
            Value::Null => Ok(None),
            other => Err(Error::TypeMismatch {
                expected: "VARCHAR".into(),
                found: other.data_type().to_string(),
            }),
        }
    }

    /// Canonical bare text form; nulls of every kind render as `NULL`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "NULL".into(),
            Value::Boolean(None) => "NULL".into(),
            Value::Boolean(Some(b)) => if *b { "true" } else { "false" }.into(),
            Value::Numeric(n) => n.to_text(),
            Value::String(s) => s.to_text().unwrap_or_else(|| "NULL".into()),
            Value::DateTime(Some(ts)) => format_datetime(ts),
            Value::DaySecond(Some(iv)) => iv.to_text(),
            Value::YearMonth(Some(iv)) => iv.to_text(),
            Value::Binary(b) => b.to_text().unwrap_or_else(|| "NULL".into()),
            Value::Opaque(o) => o.text.clone().unwrap_or_else(|| "NULL".into()),
            Value::Tabular(Some(t)) => t.plan.statement.clone(),
            Value::Array(Some(a)) => {
                let parts: Vec<String> = a.elements().iter().map(|e| e.to_string()).collect();
                format!("({})", parts.join(", "))
            }
            Value::DateTime(None)
            | Value::DaySecond(None)
            | Value::YearMonth(None)
            | Value::Array(None)
            | Value::Tabular(None) => "NULL".into(),
        }
    }

    pub fn parse_boolean(text: &str) -> Result<Value> {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::boolean(true)),
            "false" | "0" => Ok(Value::boolean(false)),
            other => Err(Error::InvalidValue(format!(
                "invalid boolean literal {:?}",
                other
            ))),
        }
    }

    /// Parses the canonical text form of the given kind.
    pub fn parse_as(target: &DataType, text: &str) -> Result<Value> {
        match target {
            DataType::Boolean => Value::parse_boolean(text),
            DataType::Numeric => text.parse().map(Value::Numeric),
            DataType::String => Ok(Value::string(text)),
            DataType::DateTime => parse_datetime(text).map(Value::datetime),
            DataType::DaySecondInterval => {
                text.parse().map(|iv| Value::DaySecond(Some(iv)))
            }
            DataType::YearMonthInterval => {
                text.parse().map(|iv| Value::YearMonth(Some(iv)))
            }
            DataType::Binary => BinaryValue::parse(text).map(Value::Binary),
            other => Err(Error::InvalidCast {
                from: DataType::String.to_string(),
                to: other.to_string(),
            }),
        }
    }
}

/// SQL-literal rendering, used by expression formatting.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "NULL");
        }
        match self {
            Value::Boolean(Some(b)) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Numeric(n) => write!(f, "{}", n),
            Value::String(s) => {
                let text = s.to_text().unwrap_or_default();
                write!(f, "'{}'", text.replace('\'', "''"))
            }
            Value::DateTime(Some(ts)) => write!(f, "TIMESTAMP '{}'", format_datetime(ts)),
            Value::DaySecond(Some(iv)) => write!(f, "INTERVAL '{}' DAY TO SECOND", iv),
            Value::YearMonth(Some(iv)) => write!(f, "INTERVAL '{}' YEAR TO MONTH", iv),
            Value::Binary(b) => write!(f, "x'{}'", b.to_text().unwrap_or_default()),
            Value::Array(Some(a)) => {
                write!(f, "(")?;
                for (i, element) in a.elements().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, ")")
            }
            Value::Opaque(o) => write!(f, "{}", o.text.as_deref().unwrap_or("NULL")),
            Value::Tabular(Some(t)) => write!(f, "({})", t.plan.statement),
            _ => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_nulls_are_null() {
        assert!(Value::Null.is_null());
        assert!(Value::Boolean(None).is_null());
        assert!(Value::Numeric(Numeric::null()).is_null());
        assert!(Value::String(StringValue::Null).is_null());
        assert!(!Value::boolean(false).is_null());
        assert!(!Value::integer(0).is_null());
    }

    #[test]
    fn test_comparability() {
        assert!(Value::integer(1).is_comparable_to(&Value::boolean(true)));
        assert!(Value::Null.is_comparable_to(&Value::string("x")));
        assert!(!Value::string("x").is_comparable_to(&Value::integer(1)));
        assert!(!Value::Tabular(None).is_comparable_to(&Value::Tabular(None)));
    }

    #[test]
    fn test_boolean_parse() {
        assert_eq!(Value::parse_boolean("TRUE").unwrap(), Value::boolean(true));
        assert_eq!(Value::parse_boolean("0").unwrap(), Value::boolean(false));
        assert!(Value::parse_boolean("yes").is_err());
    }

    #[test]
    fn test_string_literal_quoting() {
        let v = Value::string("it's");
        assert_eq!(v.to_string(), "'it''s'");
    }
}
