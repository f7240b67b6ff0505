//! ANY/ALL quantifier reduction, including the first-unknown early stop

mod common;

use basalt::{BinaryOp, Error, Expression, QueryPlan, Quantifier, ReduceContext, Value};
use common::{call, int, null, ScriptedMethods};

fn array(elements: Vec<Expression>) -> Expression {
    Expression::constant(Value::array(elements))
}

fn quantify(q: Quantifier, op: BinaryOp, left: Expression, right: Expression) -> Expression {
    Expression::quantify(q, op, left, right).unwrap()
}

#[tokio::test]
async fn test_any_first_true_wins() {
    // 5 > 3 is decisive on the first element
    let expr = quantify(
        Quantifier::Any,
        BinaryOp::GreaterThan,
        int(5),
        array(vec![int(3), int(4), null()]),
    );
    assert_eq!(
        expr.reduce_to_value(None).await.unwrap(),
        Value::boolean(true)
    );
}

#[tokio::test]
async fn test_any_stops_at_first_unknown() {
    // 1 > 3 and 1 > 4 are false; the null element stops the scan with
    // unknown
    let expr = quantify(
        Quantifier::Any,
        BinaryOp::GreaterThan,
        int(1),
        array(vec![int(3), int(4), null()]),
    );
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_any_unknown_stops_even_before_a_decisive_element() {
    // the null is reached before the element that would have answered
    // true; the scan still stops at the null
    let expr = quantify(
        Quantifier::Any,
        BinaryOp::GreaterThan,
        int(1),
        array(vec![int(3), null(), int(0)]),
    );
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_any_exhausted_scan_is_false() {
    let expr = quantify(
        Quantifier::Any,
        BinaryOp::GreaterThan,
        int(1),
        array(vec![int(3), int(4)]),
    );
    assert_eq!(
        expr.reduce_to_value(None).await.unwrap(),
        Value::boolean(false)
    );
}

#[tokio::test]
async fn test_all_first_false_wins() {
    let expr = quantify(
        Quantifier::All,
        BinaryOp::GreaterThan,
        int(5),
        array(vec![int(1), int(7), null()]),
    );
    assert_eq!(
        expr.reduce_to_value(None).await.unwrap(),
        Value::boolean(false)
    );
}

#[tokio::test]
async fn test_all_unknown_stops_the_scan() {
    let expr = quantify(
        Quantifier::All,
        BinaryOp::GreaterThan,
        int(5),
        array(vec![int(1), null(), int(7)]),
    );
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_all_exhausted_scan_is_true() {
    let expr = quantify(
        Quantifier::All,
        BinaryOp::GreaterThan,
        int(5),
        array(vec![int(1), int(2), int(3)]),
    );
    assert_eq!(
        expr.reduce_to_value(None).await.unwrap(),
        Value::boolean(true)
    );
}

#[tokio::test]
async fn test_elements_after_the_stop_are_never_reduced() {
    let methods = ScriptedMethods::new(vec![("A", Value::integer(9))]);
    let ctx = ReduceContext::new().with_methods(&methods);
    // the scan decides at the second element; the function in the third
    // slot must never run
    let expr = quantify(
        Quantifier::All,
        BinaryOp::GreaterThan,
        int(5),
        array(vec![int(1), int(7), call("A")]),
    );
    assert_eq!(
        expr.reduce_to_value(Some(&ctx)).await.unwrap(),
        Value::boolean(false)
    );
    assert!(methods.call_order().is_empty());
}

#[tokio::test]
async fn test_null_array_is_unknown() {
    let expr = quantify(
        Quantifier::Any,
        BinaryOp::Equal,
        int(1),
        Expression::constant(Value::Array(None)),
    );
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);

    let expr = quantify(Quantifier::All, BinaryOp::Equal, int(1), null());
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_non_array_right_side_is_an_error() {
    let expr = quantify(Quantifier::Any, BinaryOp::Equal, int(1), int(2));
    assert!(matches!(
        expr.reduce(None).await.unwrap_err(),
        Error::TypeMismatch { .. }
    ));
}

#[tokio::test]
async fn test_tabular_right_side_is_unsupported() {
    let plan = QueryPlan {
        statement: "SELECT n FROM numbers".into(),
        columns: vec!["n".into()],
    };
    let expr = quantify(
        Quantifier::Any,
        BinaryOp::Equal,
        int(1),
        Expression::tabular_query(plan),
    );
    assert!(matches!(
        expr.reduce(None).await.unwrap_err(),
        Error::Unsupported(_)
    ));
}
