//! Expression trees: construction, rewriting, reduction and rendering

pub mod context;
mod display;
pub mod node;
pub mod reduce;
pub mod rewrite;

pub use context::{
    Invocation, MethodDescriptor, MethodLookup, MethodResolver, ReduceContext, ReferenceResolver,
    VariableResolver,
};
pub use node::{
    Expression, ExpressionKind, FunctionArg, QualifiedName, Quantifier,
};
pub use rewrite::{prepare, rewrite_children, ExpressionPreparer, ParameterBinder, Rewriter};
