//! ROUND, CEIL and FLOOR functions

use super::{
    numeric_arg, validate_numeric_args, Function, FunctionCatalog, FunctionSignature,
};
use crate::error::{Error, Result};
use crate::types::{DataType, Value};
use std::sync::Arc;

pub struct RoundFunction;
pub struct CeilFunction;
pub struct FloorFunction;

impl Function for RoundFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "ROUND",
            min_args: 1,
            max_args: 2,
            returns: DataType::Numeric,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_numeric_args("ROUND", arg_types)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        let value = numeric_arg(args, 0, "ROUND")?;
        let digits = if args.len() > 1 {
            let digits = numeric_arg(args, 1, "ROUND")?;
            if digits.is_null() {
                return Ok(Value::Null);
            }
            digits
                .to_i64()
                .filter(|d| (0..=28).contains(d))
                .ok_or_else(|| Error::InvalidValue("ROUND digits must be 0..=28".into()))?
                as u32
        } else {
            0
        };
        Ok(Value::Numeric(value.round(digits)))
    }
}

impl Function for CeilFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "CEIL",
            min_args: 1,
            max_args: 1,
            returns: DataType::Numeric,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_numeric_args("CEIL", arg_types)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(Value::Numeric(numeric_arg(args, 0, "CEIL")?.ceil()))
    }
}

impl Function for FloorFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "FLOOR",
            min_args: 1,
            max_args: 1,
            returns: DataType::Numeric,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_numeric_args("FLOOR", arg_types)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(Value::Numeric(numeric_arg(args, 0, "FLOOR")?.floor()))
    }
}

/// Register the rounding functions
pub(super) fn register(catalog: &mut FunctionCatalog) {
    catalog.register(Arc::new(RoundFunction));
    catalog.register(Arc::new(CeilFunction));
    catalog.register(Arc::new(FloorFunction));
}
