//! LIKE / NOT LIKE reduction

mod common;

use basalt::{Error, Expression, PatternMatcher, ReduceContext, Result, Value};

fn text(s: &str) -> Expression {
    Expression::constant(Value::string(s))
}

fn like(left: Expression, pattern: Expression) -> Expression {
    Expression::string_match(false, left, pattern, None)
}

#[tokio::test]
async fn test_wildcards() {
    assert_eq!(
        like(text("abc"), text("a%c")).reduce_to_value(None).await.unwrap(),
        Value::boolean(true)
    );
    assert_eq!(
        like(text("abc"), text("a_c")).reduce_to_value(None).await.unwrap(),
        Value::boolean(true)
    );
    assert_eq!(
        like(text("abc"), text("b%")).reduce_to_value(None).await.unwrap(),
        Value::boolean(false)
    );
}

#[tokio::test]
async fn test_escape_makes_wildcard_literal() {
    // a\%c with escape \ matches the literal percent, not the wildcard
    let expr = Expression::string_match(
        false,
        text("a%c"),
        text("a\\%c"),
        Some(text("\\")),
    );
    assert_eq!(
        expr.reduce_to_value(None).await.unwrap(),
        Value::boolean(true)
    );
    let expr = Expression::string_match(
        false,
        text("abc"),
        text("a\\%c"),
        Some(text("\\")),
    );
    assert_eq!(
        expr.reduce_to_value(None).await.unwrap(),
        Value::boolean(false)
    );
}

#[tokio::test]
async fn test_not_like_negates() {
    let expr = Expression::string_match(true, text("abc"), text("b%"), None);
    assert_eq!(
        expr.reduce_to_value(None).await.unwrap(),
        Value::boolean(true)
    );
}

#[tokio::test]
async fn test_escape_must_be_one_character() {
    let expr = Expression::string_match(false, text("abc"), text("a%"), Some(text("!!")));
    assert_eq!(
        expr.reduce(None).await.unwrap_err(),
        Error::InvalidEscape("!!".into())
    );
    let expr = Expression::string_match(false, text("abc"), text("a%"), Some(text("")));
    assert!(matches!(
        expr.reduce(None).await.unwrap_err(),
        Error::InvalidEscape(_)
    ));
}

#[tokio::test]
async fn test_null_operands_reduce_to_null() {
    let expr = like(common::null(), text("a%"));
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);

    let expr = like(text("abc"), common::null());
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);

    // a null escape propagates too, even under NOT LIKE
    let expr = Expression::string_match(true, text("abc"), text("a%"), Some(common::null()));
    assert_eq!(expr.reduce_to_value(None).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_non_string_operand_is_an_error() {
    let expr = like(common::int(1), text("a%"));
    assert!(matches!(
        expr.reduce(None).await.unwrap_err(),
        Error::TypeMismatch { .. }
    ));
}

struct CaseInsensitive;

impl PatternMatcher for CaseInsensitive {
    fn matches(&self, text: &str, pattern: &str, escape: char) -> Result<bool> {
        basalt::LikePattern.matches(
            &text.to_lowercase(),
            &pattern.to_lowercase(),
            escape,
        )
    }
}

#[tokio::test]
async fn test_pluggable_matcher() {
    let matcher = CaseInsensitive;
    let ctx = ReduceContext::new().with_pattern(&matcher);
    let expr = like(text("ABC"), text("a%"));
    // the default matcher is case-sensitive...
    assert_eq!(
        expr.reduce_to_value(None).await.unwrap(),
        Value::boolean(false)
    );
    // ...the plugged strategy is not
    assert_eq!(
        expr.reduce_to_value(Some(&ctx)).await.unwrap(),
        Value::boolean(true)
    );
}
