//! BranchNode: first matching predicate wins; default otherwise.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use langchain::{BranchNode, Runnable, RunnableError, Value};

use crate::common::{count, counting, fail, upper};

/// **Scenario**: With cases [(false, n1), (true, n2)] and no default, n2 runs and n1 never does.
#[tokio::test]
async fn second_case_runs_first_never_invoked() {
    let (n1, n1_runs) = counting("n1");
    let (n2, n2_runs) = counting("n2");
    let branch = BranchNode::new().when(|_| false, n1).when(|_| true, n2);

    for input in [Value::from("x"), Value::map([("k", 1)]), Value::Null] {
        assert_eq!(branch.invoke(input).await.unwrap(), Value::from("n2"));
    }
    assert_eq!(count(&n1_runs), 0);
    assert_eq!(count(&n2_runs), 3);
}

/// **Scenario**: Predicates after the first match are never evaluated.
#[tokio::test]
async fn predicates_short_circuit() {
    let evaluated = Arc::new(AtomicUsize::new(0));
    let seen = evaluated.clone();
    let branch = BranchNode::new()
        .when(|_| true, upper())
        .when(
            move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                true
            },
            upper(),
        );
    branch.invoke(Value::from("x")).await.unwrap();
    assert_eq!(evaluated.load(Ordering::SeqCst), 0);
}

/// **Scenario**: No match and no default fails with NoBranchMatched carrying the input.
#[tokio::test]
async fn no_match_without_default_fails() {
    let branch = BranchNode::new()
        .when(|_| false, upper())
        .with_name("router");
    match branch.invoke(Value::from("x")).await {
        Err(RunnableError::NoBranchMatched { node, input }) => {
            assert_eq!(node, "router");
            assert_eq!(input, Value::from("x"));
        }
        other => panic!("expected NoBranchMatched, got {:?}", other),
    }
}

/// **Scenario**: No match with a default returns default.invoke(input).
#[tokio::test]
async fn no_match_runs_default() {
    let (fallback, ran) = counting("fallback");
    let branch = BranchNode::new()
        .when(|_| false, upper())
        .otherwise(fallback);
    assert_eq!(branch.invoke(Value::from("x")).await.unwrap(), Value::from("fallback"));
    assert_eq!(count(&ran), 1);
}

/// **Scenario**: A matched node's failure is returned; later cases and the default are not tried.
#[tokio::test]
async fn matched_failure_does_not_fall_through() {
    let (later, later_runs) = counting("later");
    let (fallback, fallback_runs) = counting("fallback");
    let branch = BranchNode::new()
        .when(|_| true, fail("matched"))
        .when(|_| true, later)
        .otherwise(fallback);
    assert!(branch.invoke(Value::from("x")).await.is_err());
    assert_eq!(count(&later_runs), 0);
    assert_eq!(count(&fallback_runs), 0);
}

/// **Scenario**: Predicates route on the upstream value's content.
#[tokio::test]
async fn routes_on_input_content() {
    let branch = BranchNode::new()
        .when(
            |v: &Value| v.get("sentiment").and_then(Value::as_str) == Some("pos"),
            counting("thanks").0,
        )
        .when(
            |v: &Value| v.get("sentiment").and_then(Value::as_str) == Some("neg"),
            counting("sorry").0,
        );
    let out = branch
        .invoke(Value::map([("sentiment", "neg")]))
        .await
        .unwrap();
    assert_eq!(out, Value::from("sorry"));
}
