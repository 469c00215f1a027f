use doel::context::Context;
use doel::attributes::OptionTable;
use doel::{Attributes, EvalError, Evaluator, FixedZone};
use pretty_assertions::assert_eq;

fn attrs() -> Attributes {
    Attributes::new().with("city", "Fort Lee").with("state_abbr", "NJ")
}

// Unbalanced input drops the whole expression instead of failing the caller.
#[tokio::test]
async fn test_unclosed_bracket_yields_empty_label() {
    assert_eq!(doel::eval("[abc", &attrs(), &FixedZone(true)).await, "");
    assert_eq!(doel::eval("city, state_abbr)", &attrs(), &FixedZone(true)).await, "");
}

#[tokio::test]
async fn test_strict_api_reports_imbalance() {
    let attrs = attrs();
    let zone = FixedZone(true);
    let options = OptionTable::with_builtins();
    let evaluator = Evaluator::new(&attrs, &zone, &options);
    let err = evaluator.try_eval("city(x").await.unwrap_err();
    assert!(matches!(err, EvalError::StructuralImbalance { open: '(', .. }));
}

#[tokio::test]
async fn test_depth_guard() {
    let attrs = attrs();
    let zone = FixedZone(true);
    let options = OptionTable::with_builtins();
    let evaluator = Evaluator::new(&attrs, &zone, &options)
        .with_context(Context::default().with_max_depth(2));
    let expr = "a[b[c[city]]]";
    assert_eq!(
        evaluator.try_eval(expr).await,
        Err(EvalError::DepthExceeded { limit: 2 })
    );
    assert_eq!(evaluator.eval(expr).await, "");
    assert_eq!(evaluator.eval("a[b[city]]").await, "Fort Lee");
}

#[tokio::test]
async fn test_empty_input() {
    assert_eq!(doel::eval("", &attrs(), &FixedZone(true)).await, "");
    assert_eq!(doel::eval(" , ,", &attrs(), &FixedZone(true)).await, "");
}

#[tokio::test]
async fn test_unbalanced_fallback_keeps_siblings_before_it() {
    assert_eq!(doel::eval("city, a[b(]c)", &attrs(), &FixedZone(true)).await, "Fort Lee");
}
