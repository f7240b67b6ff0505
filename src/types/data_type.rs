//! Static types of the value algebra

use serde::{Deserialize, Serialize};
use std::fmt;

/// The static type of an expression or value.
///
/// `Null` is the type of the universal null constant; it is compatible
/// with every other type for comparison purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Null,
    Boolean,
    Numeric,
    String,
    DateTime,
    DaySecondInterval,
    YearMonthInterval,
    Binary,
    Array,
    /// A user-defined opaque type, identified by name.
    Opaque(String),
    Tabular,
}

impl DataType {
    /// Whether values of these two types may be ordered/equated.
    ///
    /// Types are comparable when they match, when one side is boolean and
    /// the other numeric (zero/one), or when either side is the universal
    /// null. Tabular values are never independently comparable; arrays
    /// hold unreduced expressions and are compared by the quantifier, not
    /// directly.
    pub fn is_comparable_to(&self, other: &DataType) -> bool {
        use DataType::*;
        match (self, other) {
            (Null, _) | (_, Null) => true,
            (Tabular, _) | (_, Tabular) => false,
            (Array, _) | (_, Array) => false,
            (Boolean, Numeric) | (Numeric, Boolean) => true,
            (Opaque(a), Opaque(b)) => a == b,
            (a, b) => a == b,
        }
    }

    /// Whether this type participates in arithmetic.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Numeric)
    }

    pub fn is_interval(&self) -> bool {
        matches!(
            self,
            DataType::DaySecondInterval | DataType::YearMonthInterval
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => write!(f, "NULL"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Numeric => write!(f, "NUMERIC"),
            DataType::String => write!(f, "VARCHAR"),
            DataType::DateTime => write!(f, "TIMESTAMP"),
            DataType::DaySecondInterval => write!(f, "INTERVAL DAY TO SECOND"),
            DataType::YearMonthInterval => write!(f, "INTERVAL YEAR TO MONTH"),
            DataType::Binary => write!(f, "VARBINARY"),
            DataType::Array => write!(f, "ARRAY"),
            DataType::Opaque(name) => write!(f, "{}", name),
            DataType::Tabular => write!(f, "TABLE"),
        }
    }
}
