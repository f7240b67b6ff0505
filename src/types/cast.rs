//! Kind-to-kind casts
//!
//! String is the pivot: every kind renders to and parses from its
//! canonical text form. Nulls cast to the null of the target kind.

use crate::error::{Error, Result};
use crate::types::data_type::DataType;
use crate::types::numeric::{Numeric, NumericState};
use crate::types::temporal::format_datetime;
use crate::types::value::Value;

impl Value {
    pub fn cast_to(&self, target: &DataType) -> Result<Value> {
        if self.is_null() {
            return Ok(Value::null_of(target));
        }
        let invalid = || Error::InvalidCast {
            from: self.data_type().to_string(),
            to: target.to_string(),
        };
        match (self, target) {
            // identity casts
            (v, t) if v.data_type() == *t => Ok(v.clone()),

            (Value::Boolean(Some(b)), DataType::Numeric) => {
                Ok(Value::integer(if *b { 1 } else { 0 }))
            }
            (Value::Boolean(Some(b)), DataType::String) => {
                Ok(Value::string(if *b { "true" } else { "false" }))
            }

            (Value::Numeric(n), DataType::Boolean) => match n.state() {
                Some(NumericState::Normal) => Ok(Value::boolean(!n.is_zero())),
                _ => Err(invalid()),
            },
            (Value::Numeric(n), DataType::String) => Ok(Value::string(n.to_text())),

            (Value::String(_), t) => {
                let text = self.as_string()?.unwrap_or_default();
                match t {
                    DataType::Binary => Ok(Value::binary(text.into_bytes())),
                    DataType::Opaque(name) => Ok(Value::Opaque(crate::types::value::OpaqueValue {
                        type_name: name.clone(),
                        text: Some(text),
                    })),
                    _ => Value::parse_as(t, &text).map_err(|_| invalid()),
                }
            }

            (Value::DateTime(Some(ts)), DataType::String) => {
                Ok(Value::string(format_datetime(ts)))
            }
            (Value::DaySecond(Some(iv)), DataType::String) => Ok(Value::string(iv.to_text())),
            (Value::YearMonth(Some(iv)), DataType::String) => Ok(Value::string(iv.to_text())),

            (Value::Binary(b), DataType::String) => {
                let mut bytes = Vec::new();
                bytes.extend(b.bytes());
                String::from_utf8(bytes)
                    .map(Value::string)
                    .map_err(|_| invalid())
            }
            (Value::Opaque(o), DataType::String) => match &o.text {
                Some(text) => Ok(Value::string(text.clone())),
                None => Ok(Value::String(crate::types::text::StringValue::Null)),
            },

            _ => Err(invalid()),
        }
    }
}

impl Numeric {
    /// Numeric view of a boolean, for boolean-vs-numeric comparison.
    pub fn from_bool(value: bool) -> Numeric {
        if value {
            Numeric::one()
        } else {
            Numeric::zero()
        }
    }
}
