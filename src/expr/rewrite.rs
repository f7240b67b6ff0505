//! The rewrite engine
//!
//! Generic recursive tree rewriting: every composite kind visits its
//! children and reconstructs an equivalent node through the same
//! validated factories used at original construction, so a rewrite is
//! always a structurally fresh, independently valid tree. The closed sum
//! type makes an unknown kind unrepresentable, so the exhaustive match
//! is the whole dispatch.
//!
//! The `prepare` specialization consults a pluggable capability before
//! recursing into each node and lets it substitute the node outright —
//! parameter binding is the canonical use.

use crate::error::Result;
use crate::expr::node::{Expression, FunctionArg};
use crate::types::Value;

/// Recursive tree rewriter. Override [`Rewriter::rewrite_expression`] to
/// intercept nodes; call [`rewrite_children`] to get the default
/// reconstruct-from-rewritten-children behavior.
pub trait Rewriter {
    fn rewrite_expression(&mut self, expr: &Expression) -> Result<Expression> {
        rewrite_children(self, expr)
    }
}

/// Default rewrite: visit each child, then rebuild the node from the
/// (possibly changed) children. Absent optional children stay absent.
pub fn rewrite_children<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    expr: &Expression,
) -> Result<Expression> {
    Ok(match expr {
        Expression::Constant(_)
        | Expression::Reference(_)
        | Expression::Variable(_)
        | Expression::Parameter(_)
        | Expression::TabularQuery(_) => expr.clone(),

        Expression::Binary(b) => Expression::binary(
            b.op,
            rewriter.rewrite_expression(&b.left)?,
            rewriter.rewrite_expression(&b.right)?,
        ),
        Expression::Unary(u) => {
            Expression::unary(u.op, rewriter.rewrite_expression(&u.operand)?)
        }
        Expression::Cast(c) => {
            Expression::cast(rewriter.rewrite_expression(&c.value)?, c.target.clone())
        }
        Expression::Condition(c) => Expression::condition(
            rewriter.rewrite_expression(&c.test)?,
            rewriter.rewrite_expression(&c.if_true)?,
            rewrite_optional(rewriter, c.if_false.as_deref())?,
        ),
        Expression::StringMatch(m) => Expression::string_match(
            m.negated,
            rewriter.rewrite_expression(&m.left)?,
            rewriter.rewrite_expression(&m.pattern)?,
            rewrite_optional(rewriter, m.escape.as_deref())?,
        ),
        Expression::VariableAssign(a) => {
            Expression::variable_assign(a.name.clone(), rewriter.rewrite_expression(&a.value)?)
        }
        Expression::ReferenceAssign(a) => {
            Expression::reference_assign(a.name.clone(), rewriter.rewrite_expression(&a.value)?)
        }
        Expression::Function(func) => {
            let args = func
                .args
                .iter()
                .map(|arg| {
                    Ok(FunctionArg {
                        name: arg.name.clone(),
                        value: rewriter.rewrite_expression(&arg.value)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Expression::function(func.name.clone(), args)
        }
        Expression::Group(g) => Expression::group(rewriter.rewrite_expression(&g.inner)?),
        Expression::Quantify(q) => Expression::quantify(
            q.quantifier,
            q.op,
            rewriter.rewrite_expression(&q.left)?,
            rewriter.rewrite_expression(&q.right)?,
        )?,
    })
}

/// An absent child stays absent.
fn rewrite_optional<R: Rewriter + ?Sized>(
    rewriter: &mut R,
    expr: Option<&Expression>,
) -> Result<Option<Expression>> {
    expr.map(|e| rewriter.rewrite_expression(e)).transpose()
}

/// Capability consulted by [`prepare`] before recursing into a node.
pub trait ExpressionPreparer {
    /// Whether this preparer handles the given node.
    fn can_prepare(&self, expr: &Expression) -> bool;

    /// Produce the substitute for a claimed node.
    fn prepare(&self, expr: &Expression) -> Result<Expression>;
}

/// Rewrite with substitution: nodes the preparer claims are replaced
/// outright; everything else is rewritten recursively as usual.
pub fn prepare(expr: &Expression, preparer: &dyn ExpressionPreparer) -> Result<Expression> {
    struct Prepare<'a> {
        preparer: &'a dyn ExpressionPreparer,
    }

    impl Rewriter for Prepare<'_> {
        fn rewrite_expression(&mut self, expr: &Expression) -> Result<Expression> {
            if self.preparer.can_prepare(expr) {
                self.preparer.prepare(expr)
            } else {
                rewrite_children(self, expr)
            }
        }
    }

    Prepare { preparer }.rewrite_expression(expr)
}

/// Binds positional parameters to constants. Ordinals without a bound
/// value are left alone.
pub struct ParameterBinder<'a> {
    values: &'a [Value],
}

impl<'a> ParameterBinder<'a> {
    pub fn new(values: &'a [Value]) -> ParameterBinder<'a> {
        ParameterBinder { values }
    }
}

impl ExpressionPreparer for ParameterBinder<'_> {
    fn can_prepare(&self, expr: &Expression) -> bool {
        matches!(expr, Expression::Parameter(p) if p.ordinal < self.values.len())
    }

    fn prepare(&self, expr: &Expression) -> Result<Expression> {
        match expr {
            Expression::Parameter(p) => {
                Ok(Expression::constant(self.values[p.ordinal].clone()))
            }
            other => Ok(other.clone()),
        }
    }
}
