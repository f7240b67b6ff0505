//! Binary reduction: operand ordering, arithmetic, and failure modes

mod common;

use basalt::{BinaryOp, Error, Expression, Numeric, ReduceContext, Value};
use common::{call, int, ScriptedMethods};

#[tokio::test]
async fn test_arithmetic_reduces_to_constant() {
    let expr = Expression::binary(
        BinaryOp::Add,
        int(2),
        Expression::binary(BinaryOp::Multiply, int(3), int(4)),
    );
    let value = expr.reduce_to_value(None).await.unwrap();
    assert_eq!(value, Value::integer(14));
}

#[tokio::test]
async fn test_division_by_zero_reduces_to_nan() {
    let div = Expression::binary(BinaryOp::Divide, int(5), int(0));
    assert_eq!(
        div.reduce_to_value(None).await.unwrap(),
        Value::Numeric(Numeric::nan())
    );
    let rem = Expression::binary(BinaryOp::Modulo, int(5), int(0));
    assert_eq!(
        rem.reduce_to_value(None).await.unwrap(),
        Value::Numeric(Numeric::nan())
    );
}

#[tokio::test]
async fn test_null_operand_reduces_to_null() {
    let expr = Expression::binary(BinaryOp::Add, int(2), common::null());
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_unbound_parameter_does_not_reduce() {
    let expr = Expression::binary(BinaryOp::Add, int(1), Expression::parameter(0));
    let err = expr.reduce(None).await.unwrap_err();
    assert!(matches!(err, Error::NotConstant(_)));
}

#[tokio::test]
async fn test_higher_precedence_side_reduces_first() {
    // both sides are function calls with observable side effects; the
    // grouped right side binds tighter, so its effect lands first even
    // though the result recombines left-to-right
    let methods = ScriptedMethods::new(vec![
        ("A", Value::integer(1)),
        ("B", Value::integer(2)),
    ]);
    let ctx = ReduceContext::new().with_methods(&methods);
    let expr = Expression::binary(
        BinaryOp::Subtract,
        call("A"),
        Expression::group(call("B")),
    );
    let value = expr.reduce_to_value(Some(&ctx)).await.unwrap();
    assert_eq!(value, Value::integer(-1)); // still A - B
    assert_eq!(methods.call_order(), vec!["B", "A"]);
}

#[tokio::test]
async fn test_equal_precedence_reduces_left_first() {
    let methods = ScriptedMethods::new(vec![
        ("A", Value::integer(1)),
        ("B", Value::integer(2)),
    ]);
    let ctx = ReduceContext::new().with_methods(&methods);
    let expr = Expression::binary(BinaryOp::Subtract, call("A"), call("B"));
    let value = expr.reduce_to_value(Some(&ctx)).await.unwrap();
    assert_eq!(value, Value::integer(-1));
    assert_eq!(methods.call_order(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_grouped_left_side_still_reduces_first() {
    let methods = ScriptedMethods::new(vec![
        ("A", Value::integer(1)),
        ("B", Value::integer(2)),
    ]);
    let ctx = ReduceContext::new().with_methods(&methods);
    let expr = Expression::binary(
        BinaryOp::Subtract,
        Expression::group(call("A")),
        call("B"),
    );
    expr.reduce_to_value(Some(&ctx)).await.unwrap();
    assert_eq!(methods.call_order(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_incomparable_kinds_error() {
    let expr = Expression::binary(
        BinaryOp::Equal,
        Expression::constant(Value::string("1")),
        int(1),
    );
    let err = expr.reduce(None).await.unwrap_err();
    assert!(matches!(err, Error::NotComparable { .. }));
}
