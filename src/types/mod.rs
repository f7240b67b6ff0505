//! The value algebra: scalar kinds, their static types, and casts

pub mod cast;
pub mod data_type;
pub mod numeric;
pub mod temporal;
pub mod text;
pub mod value;

pub use data_type::DataType;
pub use numeric::{Numeric, NumericState};
pub use temporal::{DaySecondInterval, YearMonthInterval};
pub use text::{BinaryValue, StringValue};
pub use value::{ArrayValue, OpaqueValue, QueryPlan, TabularValue, Value};
