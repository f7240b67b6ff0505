//! Shared fixtures for the reduction tests

// not every test binary uses every fixture
#![allow(dead_code)]

use async_trait::async_trait;
use basalt::{
    DataType, Error, Expression, Invocation, MethodDescriptor, MethodLookup, MethodResolver,
    QualifiedName, ReduceContext, ReferenceResolver, Value, VariableResolver,
};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Map-backed reference resolver. Assignments are recorded so tests can
/// observe them.
#[derive(Default)]
pub struct MapReferences {
    values: HashMap<String, Value>,
    pub assigned: Mutex<HashMap<String, Value>>,
}

impl MapReferences {
    pub fn new(entries: Vec<(&str, Value)>) -> MapReferences {
        MapReferences {
            values: entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            assigned: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ReferenceResolver for MapReferences {
    async fn resolve(&self, name: &QualifiedName) -> Result<Option<Value>, Error> {
        Ok(self.values.get(&name.to_string()).cloned())
    }

    fn reference_type(&self, name: &QualifiedName) -> Option<DataType> {
        self.values.get(&name.to_string()).map(|v| v.data_type())
    }

    async fn assign(&self, name: &QualifiedName, value: Value) -> Result<(), Error> {
        self.assigned.lock().insert(name.to_string(), value);
        Ok(())
    }
}

/// In-memory session variables.
#[derive(Default)]
pub struct MemoryVariables {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryVariables {
    pub fn new(entries: Vec<(&str, Value)>) -> MemoryVariables {
        MemoryVariables {
            values: Mutex::new(
                entries
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.lock().get(name).cloned()
    }
}

#[async_trait]
impl VariableResolver for MemoryVariables {
    async fn value_of(&self, name: &str) -> Result<Option<Value>, Error> {
        Ok(self.values.lock().get(name).cloned())
    }

    async fn assign(&self, name: &str, value: Value) -> Result<(), Error> {
        self.values.lock().insert(name.to_string(), value);
        Ok(())
    }

    fn variable_type(&self, name: &str) -> Option<DataType> {
        self.values.lock().get(name).map(|v| v.data_type())
    }
}

/// Scripted method resolver: each registered name returns a fixed value
/// and every invocation is recorded, so tests can assert on side-effect
/// order. A few magic names exercise the failure lookups.
#[derive(Default)]
pub struct ScriptedMethods {
    results: HashMap<String, Value>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedMethods {
    pub fn new(entries: Vec<(&str, Value)>) -> ScriptedMethods {
        ScriptedMethods {
            results: entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_order(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl MethodResolver for ScriptedMethods {
    fn resolve(&self, invocation: &Invocation) -> MethodLookup {
        match invocation.name.name.as_str() {
            "AMBIG" => MethodLookup::Ambiguous,
            "PROC" => MethodLookup::NotAFunction,
            "MISMATCH" => MethodLookup::ArgumentMismatch("scripted mismatch".into()),
            name => match self.results.get(name) {
                Some(value) => MethodLookup::Found(MethodDescriptor {
                    name: invocation.name.clone(),
                    returns: value.data_type(),
                }),
                None => MethodLookup::NotFound,
            },
        }
    }

    async fn invoke(
        &self,
        method: &MethodDescriptor,
        _invocation: &Invocation,
        _ctx: &ReduceContext<'_>,
    ) -> Result<Expression, Error> {
        self.calls.lock().push(method.name.to_string());
        let value = self
            .results
            .get(&method.name.name)
            .cloned()
            .ok_or_else(|| Error::FunctionNotFound(method.name.to_string()))?;
        Ok(Expression::constant(value))
    }
}

/// A function call with a recordable side effect.
pub fn call(name: &str) -> Expression {
    Expression::function(QualifiedName::bare(name), vec![])
}

pub fn int(value: i64) -> Expression {
    Expression::constant(Value::integer(value))
}

pub fn null() -> Expression {
    Expression::constant(Value::Null)
}
