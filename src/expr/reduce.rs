//! The reduction engine
//!
//! Reduction collapses an expression tree to a constant against a
//! caller-supplied resolution context. It is asynchronous because
//! resolving a reference, variable or function may suspend into
//! arbitrarily expensive host work; the tree walk itself is sequential
//! and cooperative, so sibling subtrees never run in parallel. Any
//! failure surfaced by the context terminates the whole reduction —
//! partial results are never returned.

use crate::error::{Error, Result};
use crate::expr::context::{MethodLookup, ReduceContext};
use crate::expr::node::{
    BinaryExpr, ConditionExpr, Expression, FunctionExpr, QuantifyExpr, Quantifier,
    StringMatchExpr,
};
use crate::operators;
use crate::operators::like::{LikePattern, PatternMatcher, DEFAULT_ESCAPE};
use crate::types::{DataType, TabularValue, Value};
use std::future::Future;
use std::pin::Pin;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

static DEFAULT_MATCHER: LikePattern = LikePattern;

impl Expression {
    /// Reduce this tree to a constant. Terminal nodes (constants,
    /// parameters) reduce to themselves; every composite kind must
    /// collapse to a constant or fail.
    pub async fn reduce(&self, ctx: Option<&ReduceContext<'_>>) -> Result<Expression> {
        reduce_expr(self, ctx).await
    }

    /// Reduce and unwrap the constant payload. A result that is not a
    /// constant — an unbound parameter, say — is an error, never
    /// silently returned.
    pub async fn reduce_to_value(&self, ctx: Option<&ReduceContext<'_>>) -> Result<Value> {
        expect_constant(self.reduce(ctx).await?)
    }
}

fn expect_constant(expr: Expression) -> Result<Value> {
    match expr {
        Expression::Constant(c) => Ok(c.value),
        other => Err(Error::NotConstant(other.to_string())),
    }
}

fn reduce_expr<'a>(
    expr: &'a Expression,
    ctx: Option<&'a ReduceContext<'a>>,
) -> BoxFuture<'a, Result<Expression>> {
    Box::pin(async move {
        match expr {
            // terminals reduce to themselves
            Expression::Constant(_) | Expression::Parameter(_) => Ok(expr.clone()),

            Expression::Binary(b) => reduce_binary(b, ctx).await,

            Expression::Unary(u) => {
                let operand = expect_constant(reduce_expr(&u.operand, ctx).await?)?;
                let value = operators::execute_unary(u.op, &operand)?;
                Ok(Expression::constant(value))
            }

            Expression::Cast(c) => {
                let value = expect_constant(reduce_expr(&c.value, ctx).await?)?;
                Ok(Expression::constant(value.cast_to(&c.target)?))
            }

            Expression::Condition(c) => reduce_condition(c, ctx).await,

            Expression::StringMatch(m) => reduce_string_match(m, ctx).await,

            Expression::Reference(r) => {
                let ctx = ctx.ok_or(Error::NoContext)?;
                let references = ctx
                    .references
                    .ok_or(Error::ServiceNotConfigured("reference resolver"))?;
                match references.resolve(&r.name).await? {
                    Some(value) => Ok(Expression::constant(value)),
                    None => {
                        tracing::debug!("reference {} not found, reducing to null", r.name);
                        Ok(Expression::constant(Value::Null))
                    }
                }
            }

            Expression::Variable(v) => {
                let ctx = ctx.ok_or(Error::NoContext)?;
                let variables = ctx
                    .variables
                    .ok_or(Error::ServiceNotConfigured("variable resolver"))?;
                match variables.value_of(&v.name).await? {
                    Some(value) => Ok(Expression::constant(value)),
                    None => Ok(Expression::constant(Value::Null)),
                }
            }

            Expression::VariableAssign(a) => {
                let value = expect_constant(reduce_expr(&a.value, ctx).await?)?;
                let ctx = ctx.ok_or(Error::NoContext)?;
                let variables = ctx
                    .variables
                    .ok_or(Error::ServiceNotConfigured("variable resolver"))?;
                variables.assign(&a.name, value.clone()).await?;
                Ok(Expression::constant(value))
            }

            Expression::ReferenceAssign(a) => {
                let value = expect_constant(reduce_expr(&a.value, ctx).await?)?;
                let ctx = ctx.ok_or(Error::NoContext)?;
                let references = ctx
                    .references
                    .ok_or(Error::ServiceNotConfigured("reference resolver"))?;
                references.assign(&a.name, value.clone()).await?;
                Ok(Expression::constant(value))
            }

            Expression::Function(f) => reduce_function(f, ctx).await,

            // transparent wrapper, reduces through
            Expression::Group(g) => reduce_expr(&g.inner, ctx).await,

            Expression::Quantify(q) => reduce_quantify(q, ctx).await,

            Expression::TabularQuery(t) => Ok(Expression::constant(Value::Tabular(Some(
                TabularValue {
                    plan: t.plan.clone(),
                },
            )))),
        }
    })
}

/// The operand with the higher precedence reduces first (ties go left),
/// but the results recombine in the original left/right order before the
/// operator is applied. The order only shows through context side
/// effects — which side suspends first — never through the result shape.
async fn reduce_binary(b: &BinaryExpr, ctx: Option<&ReduceContext<'_>>) -> Result<Expression> {
    let left_first = b.left.precedence() >= b.right.precedence();
    let (left, right) = if left_first {
        let left = expect_constant(reduce_expr(&b.left, ctx).await?)?;
        let right = expect_constant(reduce_expr(&b.right, ctx).await?)?;
        (left, right)
    } else {
        let right = expect_constant(reduce_expr(&b.right, ctx).await?)?;
        let left = expect_constant(reduce_expr(&b.left, ctx).await?)?;
        (left, right)
    };
    let value = operators::execute_binary(b.op, &left, &right)?;
    Ok(Expression::constant(value))
}

/// An unknown test yields the universal null without touching either
/// branch.
async fn reduce_condition(c: &ConditionExpr, ctx: Option<&ReduceContext<'_>>) -> Result<Expression> {
    let test_type = c.test.static_type(ctx)?;
    if !matches!(test_type, DataType::Boolean | DataType::Null) {
        return Err(Error::ConditionNotBoolean(test_type.to_string()));
    }
    let test = expect_constant(reduce_expr(&c.test, ctx).await?)?;
    match test.as_truth()? {
        None => Ok(Expression::constant(Value::Null)),
        Some(true) => reduce_expr(&c.if_true, ctx).await,
        Some(false) => match &c.if_false {
            Some(branch) => reduce_expr(branch, ctx).await,
            None => Ok(Expression::constant(Value::Null)),
        },
    }
}

async fn reduce_string_match(
    m: &StringMatchExpr,
    ctx: Option<&ReduceContext<'_>>,
) -> Result<Expression> {
    let left = expect_constant(reduce_expr(&m.left, ctx).await?)?;
    let pattern = expect_constant(reduce_expr(&m.pattern, ctx).await?)?;
    let escape = match &m.escape {
        Some(escape_expr) => {
            let escape = expect_constant(reduce_expr(escape_expr, ctx).await?)?;
            match escape.as_string()? {
                // a null escape propagates like any other null operand
                None => return Ok(Expression::constant(Value::Null)),
                Some(text) => {
                    let mut chars = text.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => ch,
                        _ => return Err(Error::InvalidEscape(text)),
                    }
                }
            }
        }
        None => DEFAULT_ESCAPE,
    };
    let (Some(text), Some(pattern)) = (left.as_string()?, pattern.as_string()?) else {
        return Ok(Expression::constant(Value::Null));
    };
    let matcher: &dyn PatternMatcher = ctx
        .and_then(|c| c.pattern)
        .unwrap_or(&DEFAULT_MATCHER);
    let matched = matcher.matches(&text, &pattern, escape)?;
    Ok(Expression::constant(Value::boolean(
        matched != m.negated,
    )))
}

async fn reduce_function(f: &FunctionExpr, ctx: Option<&ReduceContext<'_>>) -> Result<Expression> {
    let ctx = ctx.ok_or(Error::NoContext)?;
    let methods = ctx
        .methods
        .ok_or(Error::ServiceNotConfigured("method resolution"))?;
    let invocation = f.invocation(ctx.current_schema, methods);
    tracing::debug!("resolving function {}", invocation.name);
    match methods.resolve(&invocation) {
        MethodLookup::Found(descriptor) => {
            let produced = methods.invoke(&descriptor, &invocation, ctx).await?;
            if matches!(produced, Expression::Constant(_)) {
                Ok(produced)
            } else {
                // the produced expression is itself reducible
                reduce_expr(&produced, Some(ctx)).await
            }
        }
        MethodLookup::NotFound => Err(Error::FunctionNotFound(invocation.name.to_string())),
        MethodLookup::Ambiguous => Err(Error::AmbiguousFunction(invocation.name.to_string())),
        MethodLookup::NotAFunction => Err(Error::NotAFunction(invocation.name.to_string())),
        MethodLookup::ArgumentMismatch(reason) => Err(Error::ArgumentMismatch {
            function: invocation.name.to_string(),
            reason,
        }),
    }
}

/// ANY/ALL over an array. Elements reduce lazily, in order, and the
/// scan stops at the first decisive element. A first unknown comparison
/// also stops the scan, even when a later element would have been
/// decisive.
async fn reduce_quantify(q: &QuantifyExpr, ctx: Option<&ReduceContext<'_>>) -> Result<Expression> {
    let left = expect_constant(reduce_expr(&q.left, ctx).await?)?;
    let right = expect_constant(reduce_expr(&q.right, ctx).await?)?;
    let array = match right {
        Value::Null | Value::Array(None) => {
            return Ok(Expression::constant(Value::Null));
        }
        Value::Array(Some(array)) => array,
        Value::Tabular(_) => {
            return Err(Error::Unsupported(
                "quantifier over a tabular value requires the query executor".into(),
            ));
        }
        other => {
            return Err(Error::TypeMismatch {
                expected: "ARRAY".into(),
                found: other.data_type().to_string(),
            });
        }
    };
    for element in array.elements() {
        let element = expect_constant(reduce_expr(element, ctx).await?)?;
        let verdict = operators::execute_binary(q.op, &left, &element)?;
        match (q.quantifier, verdict.as_truth()?) {
            (Quantifier::Any, Some(true)) => {
                return Ok(Expression::constant(Value::boolean(true)));
            }
            (Quantifier::All, Some(false)) => {
                return Ok(Expression::constant(Value::boolean(false)));
            }
            (_, None) => return Ok(Expression::constant(Value::Null)),
            _ => {}
        }
    }
    Ok(Expression::constant(Value::boolean(matches!(
        q.quantifier,
        Quantifier::All
    ))))
}
