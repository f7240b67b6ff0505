//! SQRT, POWER, LOG2 and trigonometric functions

use super::{
    numeric_arg, validate_numeric_args, Function, FunctionCatalog, FunctionSignature,
};
use crate::error::Result;
use crate::types::{DataType, Numeric, Value};
use std::sync::Arc;

pub struct SqrtFunction;
pub struct PowerFunction;
pub struct Log2Function;
pub struct SinFunction;
pub struct CosFunction;
pub struct TanFunction;
pub struct AbsFunction;

impl Function for SqrtFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "SQRT",
            min_args: 1,
            max_args: 1,
            returns: DataType::Numeric,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_numeric_args("SQRT", arg_types)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(Value::Numeric(numeric_arg(args, 0, "SQRT")?.sqrt()))
    }
}

impl Function for PowerFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "POWER",
            min_args: 2,
            max_args: 2,
            returns: DataType::Numeric,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_numeric_args("POWER", arg_types)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        let base = numeric_arg(args, 0, "POWER")?;
        let exponent = numeric_arg(args, 1, "POWER")?;
        Ok(Value::Numeric(base.power(&exponent)?))
    }
}

impl Function for Log2Function {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "LOG2",
            min_args: 1,
            max_args: 1,
            returns: DataType::Numeric,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_numeric_args("LOG2", arg_types)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(Value::Numeric(numeric_arg(args, 0, "LOG2")?.log2()?))
    }
}

macro_rules! trig_function {
    ($type:ident, $name:literal, $method:ident) => {
        impl Function for $type {
            fn signature(&self) -> &FunctionSignature {
                static SIGNATURE: FunctionSignature = FunctionSignature {
                    name: $name,
                    min_args: 1,
                    max_args: 1,
                    returns: DataType::Numeric,
                };
                &SIGNATURE
            }

            fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
                validate_numeric_args($name, arg_types)
            }

            fn execute(&self, args: &[Value]) -> Result<Value> {
                Ok(Value::Numeric(numeric_arg(args, 0, $name)?.$method()))
            }
        }
    };
}

trig_function!(SinFunction, "SIN", sin);
trig_function!(CosFunction, "COS", cos);
trig_function!(TanFunction, "TAN", tan);

impl Function for AbsFunction {
    fn signature(&self) -> &FunctionSignature {
        static SIGNATURE: FunctionSignature = FunctionSignature {
            name: "ABS",
            min_args: 1,
            max_args: 1,
            returns: DataType::Numeric,
        };
        &SIGNATURE
    }

    fn validate(&self, arg_types: &[DataType]) -> Result<DataType> {
        validate_numeric_args("ABS", arg_types)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(Value::Numeric(numeric_arg(args, 0, "ABS")?.abs()))
    }
}

/// Register the math functions
pub(super) fn register(catalog: &mut FunctionCatalog) {
    catalog.register(Arc::new(SqrtFunction));
    catalog.register(Arc::new(PowerFunction));
    catalog.register(Arc::new(Log2Function));
    catalog.register(Arc::new(SinFunction));
    catalog.register(Arc::new(CosFunction));
    catalog.register(Arc::new(TanFunction));
    catalog.register(Arc::new(AbsFunction));
}
