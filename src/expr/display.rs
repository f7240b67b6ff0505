//! Canonical SQL rendering
//!
//! Every node renders by delegating to its children and inserting its
//! operator or keyword. Group nodes print explicit parentheses; other
//! composite children are defensively parenthesized when they bind
//! looser than their parent on the precedence ladder.

use crate::expr::node::Expression;
use std::fmt;

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(c) => write!(f, "{}", c.value),
            Expression::Binary(b) => {
                write_operand(f, self, &b.left)?;
                write!(f, " {} ", b.op.symbol())?;
                write_operand(f, self, &b.right)
            }
            Expression::Unary(u) => {
                write!(f, "{}", u.op.symbol())?;
                if matches!(u.op, crate::operators::UnaryOp::Not) {
                    write!(f, " ")?;
                }
                write_operand(f, self, &u.operand)
            }
            Expression::Cast(c) => write!(f, "CAST({} AS {})", c.value, c.target),
            Expression::Condition(c) => {
                write!(f, "CASE WHEN {} THEN {}", c.test, c.if_true)?;
                if let Some(if_false) = &c.if_false {
                    write!(f, " ELSE {}", if_false)?;
                }
                write!(f, " END")
            }
            Expression::StringMatch(m) => {
                write_operand(f, self, &m.left)?;
                write!(f, " {} ", if m.negated { "NOT LIKE" } else { "LIKE" })?;
                write_operand(f, self, &m.pattern)?;
                if let Some(escape) = &m.escape {
                    write!(f, " ESCAPE {}", escape)?;
                }
                Ok(())
            }
            Expression::Reference(r) => write!(f, "{}", r.name),
            Expression::Variable(v) => write!(f, ":{}", v.name),
            Expression::VariableAssign(a) => write!(f, ":{} := {}", a.name, a.value),
            Expression::ReferenceAssign(a) => write!(f, "{} := {}", a.name, a.value),
            Expression::Function(func) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in func.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(name) = &arg.name {
                        write!(f, "{} => ", name)?;
                    }
                    write!(f, "{}", arg.value)?;
                }
                write!(f, ")")
            }
            Expression::Parameter(p) => write!(f, "?{}", p.ordinal),
            Expression::Group(g) => write!(f, "({})", g.inner),
            Expression::Quantify(q) => {
                write_operand(f, self, &q.left)?;
                write!(f, " {} {} (", q.op.symbol(), q.quantifier)?;
                write!(f, "{}", q.right)?;
                write!(f, ")")
            }
            Expression::TabularQuery(t) => write!(f, "({})", t.plan.statement),
        }
    }
}

/// Terminal and self-delimiting kinds never need parentheses; composite
/// children take them when they bind looser than the parent.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    parent: &Expression,
    child: &Expression,
) -> fmt::Result {
    let needs_parens = is_composite(child) && child.precedence() < parent.precedence();
    if needs_parens {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

fn is_composite(expr: &Expression) -> bool {
    matches!(
        expr,
        Expression::Binary(_)
            | Expression::Unary(_)
            | Expression::Cast(_)
            | Expression::Condition(_)
            | Expression::StringMatch(_)
            | Expression::Quantify(_)
    )
}

#[cfg(test)]
mod tests {
    use crate::expr::node::Expression;
    use crate::operators::BinaryOp;
    use crate::types::Value;

    fn int(i: i64) -> Expression {
        Expression::constant(Value::integer(i))
    }

    #[test]
    fn test_precedence_parenthesization() {
        // (1 + 2) * 3 keeps its defensive parentheses
        let sum = Expression::binary(BinaryOp::Add, int(1), int(2));
        let product = Expression::binary(BinaryOp::Multiply, sum, int(3));
        assert_eq!(product.to_string(), "(1 + 2) * 3");

        // 1 + 2 * 3 needs none
        let product = Expression::binary(BinaryOp::Multiply, int(2), int(3));
        let sum = Expression::binary(BinaryOp::Add, int(1), product);
        assert_eq!(sum.to_string(), "1 + 2 * 3");
    }

    #[test]
    fn test_group_renders_parentheses() {
        let grouped = Expression::group(int(1));
        assert_eq!(grouped.to_string(), "(1)");
    }
}
