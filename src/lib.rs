//! An embeddable SQL expression engine
//!
//! The crate is the evaluation core of a SQL engine: immutable
//! expression trees, an asynchronous reduction engine that collapses a
//! tree to a constant against a caller-supplied resolution context, and
//! a closed algebra of scalar value kinds with SQL null semantics and
//! IEEE-like special numeric states on exact decimals.
//!
//! - Parsers and planners build trees through the validated factories on
//!   [`Expression`].
//! - Hosts implement the capabilities in [`expr::context`] (reference,
//!   variable and method resolution) and hand them to
//!   [`Expression::reduce`] in a [`ReduceContext`].
//! - [`expr::rewrite`] substitutes subtrees before reduction, e.g. to
//!   bind parameters.
//!
//! Expression trees and values are immutable, so they can be shared
//! across any number of concurrent reductions against different
//! contexts.

mod error;
pub mod expr;
pub mod functions;
pub mod operators;
pub mod types;

pub use error::{Error, Result};
pub use expr::context::{
    Invocation, MethodDescriptor, MethodLookup, MethodResolver, ReduceContext, ReferenceResolver,
    VariableResolver,
};
pub use expr::node::{Expression, ExpressionKind, FunctionArg, QualifiedName, Quantifier};
pub use expr::rewrite::{prepare, ExpressionPreparer, ParameterBinder, Rewriter};
pub use functions::{Function, FunctionCatalog, FunctionSignature};
pub use operators::like::{LikePattern, PatternMatcher, DEFAULT_ESCAPE};
pub use operators::{BinaryOp, UnaryOp};
pub use types::{
    BinaryValue, DataType, DaySecondInterval, Numeric, NumericState, QueryPlan, StringValue,
    Value, YearMonthInterval,
};
