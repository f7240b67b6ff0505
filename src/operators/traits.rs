//! Core traits for value-algebra operators

use crate::error::Result;
use crate::types::{DataType, Value};

/// Trait for binary operators (two operands)
pub trait BinaryOperator: Send + Sync {
    /// Operator name for error messages
    fn name(&self) -> &'static str;

    /// Operator symbol for display
    fn symbol(&self) -> &'static str;

    /// Validate operand types and return the result type
    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType>;

    /// Execute the operation
    fn execute(&self, left: &Value, right: &Value) -> Result<Value>;
}

/// Trait for unary operators (one operand)
pub trait UnaryOperator: Send + Sync {
    /// Operator name for error messages
    fn name(&self) -> &'static str;

    /// Operator symbol for display
    fn symbol(&self) -> &'static str;

    /// Validate the operand type and return the result type
    fn validate(&self, operand: &DataType) -> Result<DataType>;

    /// Execute the operation
    fn execute(&self, operand: &Value) -> Result<Value>;
}
