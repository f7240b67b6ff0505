//! Built-in scalar functions
//!
//! A trait-based catalog separating metadata/validation from execution.
//! The catalog is an explicit immutable registry built at construction —
//! there is no process-wide registry — and it implements
//! [`MethodResolver`] so it can be dropped straight into a
//! [`ReduceContext`] as the method-resolution service, or composed
//! behind a host resolver that owns schema-qualified functions.

use crate::error::{Error, Result};
use crate::expr::context::{
    Invocation, MethodDescriptor, MethodLookup, MethodResolver, ReduceContext,
};
use crate::expr::node::Expression;
use crate::types::{DataType, Value};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

mod math;
mod round;
mod string;

/// Metadata about a function's signature
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Function name (uppercase)
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    /// Result type; builtins have a fixed one.
    pub returns: DataType,
}

/// Trait for built-in scalar functions
pub trait Function: Send + Sync {
    /// Get the function's signature
    fn signature(&self) -> &FunctionSignature;

    /// Validate argument types and return the result type
    fn validate(&self, arg_types: &[DataType]) -> Result<DataType>;

    /// Execute the function with reduced argument values
    fn execute(&self, args: &[Value]) -> Result<Value>;
}

/// Registry of built-in scalar functions
pub struct FunctionCatalog {
    functions: HashMap<String, Arc<dyn Function>>,
}

impl FunctionCatalog {
    pub fn empty() -> FunctionCatalog {
        FunctionCatalog {
            functions: HashMap::new(),
        }
    }

    /// The standard builtins.
    pub fn standard() -> FunctionCatalog {
        let mut catalog = FunctionCatalog::empty();
        math::register(&mut catalog);
        round::register(&mut catalog);
        string::register(&mut catalog);
        catalog
    }

    pub fn register(&mut self, function: Arc<dyn Function>) {
        let name = function.signature().name.to_string();
        self.functions.insert(name, function);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.functions.get(&name.to_uppercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|k| k.as_str())
    }
}

#[async_trait]
impl MethodResolver for FunctionCatalog {
    fn resolve(&self, invocation: &Invocation) -> MethodLookup {
        // builtins live in no schema; a qualified name is someone else's
        if invocation.name.is_qualified() {
            return MethodLookup::NotFound;
        }
        let Some(function) = self.get(&invocation.name.name) else {
            return MethodLookup::NotFound;
        };
        let signature = function.signature();
        if invocation.arguments.iter().any(|arg| arg.name.is_some()) {
            return MethodLookup::ArgumentMismatch(
                "built-in functions take positional arguments only".into(),
            );
        }
        let supplied = invocation.arguments.len();
        if supplied < signature.min_args || supplied > signature.max_args {
            return MethodLookup::ArgumentMismatch(format!(
                "expected {} to {} arguments, got {}",
                signature.min_args, signature.max_args, supplied
            ));
        }
        MethodLookup::Found(MethodDescriptor {
            name: invocation.name.clone(),
            returns: signature.returns.clone(),
        })
    }

    async fn invoke(
        &self,
        method: &MethodDescriptor,
        invocation: &Invocation,
        ctx: &ReduceContext<'_>,
    ) -> Result<Expression> {
        let function = self
            .get(&method.name.name)
            .ok_or_else(|| Error::FunctionNotFound(method.name.to_string()))?;
        let mut values = Vec::with_capacity(invocation.arguments.len());
        for arg in &invocation.arguments {
            values.push(arg.value.reduce_to_value(Some(ctx)).await?);
        }
        let types: Vec<DataType> = values.iter().map(|v| v.data_type()).collect();
        function.validate(&types)?;
        let result = function.execute(&values)?;
        Ok(Expression::constant(result))
    }

    fn is_builtin(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_uppercase())
    }
}

/// Pull a numeric argument, letting kind-level nulls through as a null
/// numeric.
pub(crate) fn numeric_arg(args: &[Value], index: usize, name: &str) -> Result<crate::types::Numeric> {
    match args.get(index) {
        Some(Value::Numeric(n)) => Ok(*n),
        Some(Value::Null) => Ok(crate::types::Numeric::null()),
        Some(other) => Err(Error::TypeMismatch {
            expected: format!("{}: NUMERIC argument", name),
            found: other.data_type().to_string(),
        }),
        None => Err(Error::ArgumentMismatch {
            function: name.into(),
            reason: format!("missing argument {}", index + 1),
        }),
    }
}

pub(crate) fn validate_numeric_args(name: &str, arg_types: &[DataType]) -> Result<DataType> {
    for arg in arg_types {
        if !matches!(arg, DataType::Numeric | DataType::Null) {
            return Err(Error::TypeMismatch {
                expected: format!("{}: NUMERIC argument", name),
                found: arg.to_string(),
            });
        }
    }
    Ok(DataType::Numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::node::{FunctionArg, QualifiedName};

    #[test]
    fn test_resolution() {
        let catalog = FunctionCatalog::standard();
        assert!(catalog.is_builtin("sqrt"));
        assert!(catalog.is_builtin("SQRT"));
        assert!(!catalog.is_builtin("nonesuch"));

        let ok = Invocation {
            name: QualifiedName::bare("SQRT"),
            arguments: vec![FunctionArg::positional(Expression::constant(
                Value::integer(4),
            ))],
        };
        assert!(matches!(catalog.resolve(&ok), MethodLookup::Found(_)));

        let missing = Invocation {
            name: QualifiedName::bare("NONESUCH"),
            arguments: vec![],
        };
        assert!(matches!(catalog.resolve(&missing), MethodLookup::NotFound));

        let wrong_arity = Invocation {
            name: QualifiedName::bare("SQRT"),
            arguments: vec![],
        };
        assert!(matches!(
            catalog.resolve(&wrong_arity),
            MethodLookup::ArgumentMismatch(_)
        ));

        let qualified = Invocation {
            name: QualifiedName::qualified("app", "SQRT"),
            arguments: vec![],
        };
        assert!(matches!(catalog.resolve(&qualified), MethodLookup::NotFound));
    }
}
