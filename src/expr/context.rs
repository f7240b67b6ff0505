//! External resolution capabilities
//!
//! Reduction suspends into these traits whenever a reference, variable
//! or function has to be resolved. The engine owns none of them: the
//! host bundles whatever it implements into a [`ReduceContext`] and
//! passes it to `reduce`. Reduction takes `Option<&ReduceContext>` so
//! that "no context at all" and "context without the needed service"
//! stay distinct errors.

use crate::error::Result;
use crate::expr::node::{Expression, FunctionArg, QualifiedName};
use crate::operators::like::PatternMatcher;
use crate::types::{DataType, Value};
use async_trait::async_trait;

/// Catalog-backed reference lookup and assignment.
///
/// `resolve` returning `None` means the name is unknown; reduction turns
/// that into the universal null, not an error.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    async fn resolve(&self, name: &QualifiedName) -> Result<Option<Value>>;

    /// Static type of a reference, when the catalog knows it.
    fn reference_type(&self, name: &QualifiedName) -> Option<DataType>;

    async fn assign(&self, name: &QualifiedName, value: Value) -> Result<()>;
}

/// Session-scoped variables.
#[async_trait]
pub trait VariableResolver: Send + Sync {
    async fn value_of(&self, name: &str) -> Result<Option<Value>>;

    async fn assign(&self, name: &str, value: Value) -> Result<()>;

    fn variable_type(&self, name: &str) -> Option<DataType>;
}

/// An invocation descriptor: the (possibly qualified) function name and
/// its named-or-positional arguments, unreduced.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub name: QualifiedName,
    pub arguments: Vec<FunctionArg>,
}

/// A resolved callable.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: QualifiedName,
    pub returns: DataType,
}

/// Outcome of method resolution. Each non-`Found` variant maps to a
/// distinct reduction error.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodLookup {
    Found(MethodDescriptor),
    NotFound,
    Ambiguous,
    /// The name resolved, but to something that is not a function (a
    /// procedure, say).
    NotAFunction,
    ArgumentMismatch(String),
}

/// Function resolution and execution.
#[async_trait]
pub trait MethodResolver: Send + Sync {
    fn resolve(&self, invocation: &Invocation) -> MethodLookup;

    /// Execute a resolved method. The produced expression is re-reduced
    /// by the engine when it is not already a constant.
    async fn invoke(
        &self,
        method: &MethodDescriptor,
        invocation: &Invocation,
        ctx: &ReduceContext<'_>,
    ) -> Result<Expression>;

    /// Whether a bare name names a built-in. Unqualified non-builtins
    /// are qualified with the current schema before resolution.
    fn is_builtin(&self, name: &str) -> bool {
        let _ = name;
        false
    }
}

/// The bundle of capabilities a reduction runs against. Every field is
/// optional; reduction reports which service was missing when it needs
/// one.
#[derive(Default, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub references: Option<&'a dyn ReferenceResolver>,
    pub variables: Option<&'a dyn VariableResolver>,
    pub methods: Option<&'a dyn MethodResolver>,
    /// Pattern-matching strategy for LIKE; the built-in matcher is used
    /// when absent.
    pub pattern: Option<&'a dyn PatternMatcher>,
    pub current_schema: Option<&'a str>,
}

impl<'a> ReduceContext<'a> {
    pub fn new() -> ReduceContext<'a> {
        ReduceContext::default()
    }

    pub fn with_references(mut self, references: &'a dyn ReferenceResolver) -> Self {
        self.references = Some(references);
        self
    }

    pub fn with_variables(mut self, variables: &'a dyn VariableResolver) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_methods(mut self, methods: &'a dyn MethodResolver) -> Self {
        self.methods = Some(methods);
        self
    }

    pub fn with_pattern(mut self, pattern: &'a dyn PatternMatcher) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_schema(mut self, schema: &'a str) -> Self {
        self.current_schema = Some(schema);
        self
    }
}
