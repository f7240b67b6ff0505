//! Helper functions shared by operator implementations

use crate::error::{Error, Result};
use crate::types::DataType;

/// Result type of a comparison over the given operand types. Comparable
/// operand kinds produce a boolean; anything else is an error, never a
/// silent false.
pub fn validate_comparison(left: &DataType, right: &DataType) -> Result<DataType> {
    if left.is_comparable_to(right) {
        Ok(DataType::Boolean)
    } else {
        Err(Error::NotComparable {
            left: left.to_string(),
            right: right.to_string(),
        })
    }
}

/// Logical connectives take boolean (or null) operands.
pub fn validate_logical(left: &DataType, right: &DataType) -> Result<DataType> {
    validate_logical_operand(left)?;
    validate_logical_operand(right)
}

pub fn validate_logical_operand(operand: &DataType) -> Result<DataType> {
    match operand {
        DataType::Boolean | DataType::Null => Ok(DataType::Boolean),
        other => Err(Error::TypeMismatch {
            expected: "BOOLEAN".into(),
            found: other.to_string(),
        }),
    }
}

/// Merge the result type of a symmetric operation when one side is the
/// universal null.
pub fn merge_nullable<'a>(left: &'a DataType, right: &'a DataType) -> Option<&'a DataType> {
    match (left, right) {
        (DataType::Null, other) | (other, DataType::Null) => Some(other),
        _ => None,
    }
}
