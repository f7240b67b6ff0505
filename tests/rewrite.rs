//! Rewrite engine and the prepare specialization

mod common;

use basalt::expr::rewrite::{prepare, rewrite_children, Rewriter};
use basalt::{
    BinaryOp, Expression, ExpressionPreparer, ParameterBinder, QualifiedName, Result, Value,
};
use common::int;

struct Identity;

impl Rewriter for Identity {}

#[test]
fn test_default_rewrite_reconstructs_an_equal_tree() {
    let original = Expression::condition(
        Expression::binary(
            BinaryOp::GreaterThan,
            Expression::reference(QualifiedName::bare("a")),
            int(0),
        ),
        Expression::string_match(
            false,
            Expression::variable("s"),
            Expression::constant(Value::string("x%")),
            None,
        ),
        Some(Expression::group(int(2))),
    );
    let rewritten = Identity.rewrite_expression(&original).unwrap();
    assert_eq!(rewritten, original);
}

/// Renames every reference, leaving everything else to the default walk.
struct RenameReferences;

impl Rewriter for RenameReferences {
    fn rewrite_expression(&mut self, expr: &Expression) -> Result<Expression> {
        match expr {
            Expression::Reference(r) => Ok(Expression::reference(QualifiedName::bare(
                format!("{}_renamed", r.name.name),
            ))),
            other => rewrite_children(self, other),
        }
    }
}

#[test]
fn test_targeted_rewrite_rebuilds_composites() {
    let original = Expression::binary(
        BinaryOp::Add,
        Expression::reference(QualifiedName::bare("a")),
        Expression::group(Expression::reference(QualifiedName::bare("b"))),
    );
    let rewritten = RenameReferences.rewrite_expression(&original).unwrap();
    assert_eq!(
        rewritten.to_string(),
        "a_renamed + (b_renamed)"
    );
    // the original tree is untouched
    assert_eq!(original.to_string(), "a + (b)");
}

#[test]
fn test_parameter_binding() {
    let tree = Expression::binary(
        BinaryOp::Add,
        Expression::parameter(0),
        Expression::binary(BinaryOp::Multiply, Expression::parameter(1), int(10)),
    );
    let values = vec![Value::integer(1), Value::integer(2)];
    let binder = ParameterBinder::new(&values);
    let bound = prepare(&tree, &binder).unwrap();
    assert_eq!(bound.to_string(), "1 + 2 * 10");
    assert!(!bound.is_reference());
}

#[test]
fn test_unbound_parameters_stay_in_place() {
    let tree = Expression::binary(
        BinaryOp::Add,
        Expression::parameter(0),
        Expression::parameter(5),
    );
    let values = vec![Value::integer(1)];
    let bound = prepare(&tree, &ParameterBinder::new(&values)).unwrap();
    assert_eq!(bound.to_string(), "1 + ?5");
}

/// A preparer that claims whole quantifiers and collapses them.
struct CollapseQuantifiers;

impl ExpressionPreparer for CollapseQuantifiers {
    fn can_prepare(&self, expr: &Expression) -> bool {
        matches!(expr, Expression::Quantify(_))
    }

    fn prepare(&self, _expr: &Expression) -> Result<Expression> {
        Ok(Expression::constant(Value::boolean(true)))
    }
}

#[test]
fn test_prepare_substitutes_claimed_nodes_outright() {
    let quant = Expression::quantify(
        basalt::Quantifier::Any,
        BinaryOp::Equal,
        int(1),
        Expression::constant(Value::array(vec![int(1)])),
    )
    .unwrap();
    let tree = Expression::binary(BinaryOp::And, quant, Expression::constant(Value::boolean(true)));
    let prepared = prepare(&tree, &CollapseQuantifiers).unwrap();
    assert_eq!(prepared.to_string(), "TRUE AND TRUE");
}
