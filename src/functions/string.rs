//! UPPER, LOWER and CHAR_LENGTH functions

use super::{Function, FunctionCatalog, FunctionSignature};
use crate::error::{Error, Result};
use crate::types::{DataType, Value};
use std::sync::Arc;

pub struct UpperFunction;
pub struct LowerFunction;
pub struct CharLengthFunction;

fn string_arg(args: &[Value], name: &str) -> Result<Option<String>> {
    match args.first() {
        Some(value) => value.as_string(),
        None => Err(Error::ArgumentMismatch {
            function: name.into(),
            reason: "missing argument 1".into(),
        }),
    }
}

fn validate_string_arg(name: &str, arg_types: &[DataType]) -> Result<()> {
    for arg in arg_types {
        if !matches!(arg, DataType::String | DataType::Null) {
            return Err(Error::TypeMismatch {
                expected: format!("{}: VARCHAR argument", name),
                found: arg.to_string(),
            });
        }
    }
    Ok(())
}

impl Function for UpperFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "UPPER",
            min_args: 1,
            max_args: 1,
            returns: DataType::String,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_string_arg("UPPER", arg_types)?;
        Ok(DataType::String)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(match string_arg(args, "UPPER")? {
            Some(text) => Value::string(text.to_uppercase()),
            None => Value::Null,
        })
    }
}

impl Function for LowerFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "LOWER",
            min_args: 1,
            max_args: 1,
            returns: DataType::String,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_string_arg("LOWER", arg_types)?;
        Ok(DataType::String)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(match string_arg(args, "LOWER")? {
            Some(text) => Value::string(text.to_lowercase()),
            None => Value::Null,
        })
    }
}

impl Function for CharLengthFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "CHAR_LENGTH",
            min_args: 1,
            max_args: 1,
            returns: DataType::Numeric,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_string_arg("CHAR_LENGTH", arg_types)?;
        Ok(DataType::Numeric)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(match string_arg(args, "CHAR_LENGTH")? {
            Some(text) => Value::integer(text.chars().count() as i64),
            None => Value::Null,
        })
    }
}

/// Register the string functions
pub(super) fn register(catalog: &mut FunctionCatalog) {
    catalog.register(Arc::new(UpperFunction));
    catalog.register(Arc::new(LowerFunction));
    catalog.register(Arc::new(CharLengthFunction));
}
