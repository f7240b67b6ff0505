//! Condition (CASE) reduction: branch laziness and test typing

mod common;

use basalt::{Error, Expression, ReduceContext, Value};
use common::{call, int, ScriptedMethods};

#[tokio::test]
async fn test_true_test_takes_the_true_branch() {
    let expr = Expression::condition(
        Expression::constant(Value::boolean(true)),
        int(1),
        Some(int(2)),
    );
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::integer(1));
}

#[tokio::test]
async fn test_false_test_takes_the_else_branch() {
    let expr = Expression::condition(
        Expression::constant(Value::boolean(false)),
        int(1),
        Some(int(2)),
    );
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::integer(2));
}

#[tokio::test]
async fn test_false_test_without_else_is_null() {
    let expr = Expression::condition(Expression::constant(Value::boolean(false)), int(1), None);
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_null_test_reduces_to_null_without_touching_branches() {
    let methods = ScriptedMethods::new(vec![
        ("X", Value::integer(1)),
        ("Y", Value::integer(2)),
    ]);
    let ctx = ReduceContext::new().with_methods(&methods);
    let expr = Expression::condition(common::null(), call("X"), Some(call("Y")));
    let value = expr.reduce_to_value(Some(&ctx)).await.unwrap();
    assert_eq!(value, Value::Null);
    // neither branch's side effect fired
    assert!(methods.call_order().is_empty());
}

#[tokio::test]
async fn test_taken_branch_side_effect_fires() {
    let methods = ScriptedMethods::new(vec![
        ("T", Value::boolean(true)),
        ("X", Value::integer(1)),
        ("Y", Value::integer(2)),
    ]);
    let ctx = ReduceContext::new().with_methods(&methods);
    let expr = Expression::condition(call("T"), call("X"), Some(call("Y")));
    let value = expr.reduce_to_value(Some(&ctx)).await.unwrap();
    assert_eq!(value, Value::integer(1));
    assert_eq!(methods.call_order(), vec!["T", "X"]);
}

#[tokio::test]
async fn test_non_boolean_test_is_an_error() {
    let expr = Expression::condition(int(1), int(2), Some(int(3)));
    let err = expr.reduce(None).await.unwrap_err();
    assert!(matches!(err, Error::ConditionNotBoolean(_)));
}

#[tokio::test]
async fn test_kind_level_null_boolean_test_is_null() {
    let expr = Expression::condition(
        Expression::constant(Value::Boolean(None)),
        int(1),
        Some(int(2)),
    );
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);
}
