//! SequenceNode: output of step i feeds step i+1; first failure aborts.

use langchain::{BuildError, Node, PassthroughNode, Runnable, RunnableError, SequenceNode, Value};

use crate::common::{append, count, counting, fail, upper};

/// **Scenario**: Sequence([a, b, c]).invoke(x) == c(b(a(x))).
#[tokio::test]
async fn sequence_equals_nested_application() {
    let (a, b, c) = (append("-a"), append("-b"), upper());
    let seq = SequenceNode::from_steps(vec![a.clone().into(), b.clone().into(), c.clone().into()])
        .unwrap();

    let x = Value::from("x");
    let nested = c
        .invoke(b.invoke(a.invoke(x.clone()).await.unwrap()).await.unwrap())
        .await
        .unwrap();
    assert_eq!(seq.invoke(x).await.unwrap(), nested);
    assert_eq!(nested, Value::from("X-A-B"));
}

#[test]
fn empty_sequence_is_rejected() {
    assert_eq!(
        SequenceNode::from_steps(Vec::new()).unwrap_err(),
        BuildError::EmptySequence
    );
}

/// **Scenario**: A failing step aborts the rest and its error reaches the caller unchanged.
#[tokio::test]
async fn failure_aborts_remaining_steps_unwrapped() {
    let (after, ran) = counting("after");
    let chain: Node = append("-a") | fail("boom") | after;
    match chain.invoke(Value::from("x")).await {
        Err(RunnableError::ExecutionFailed(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected ExecutionFailed, got {:?}", other),
    }
    assert_eq!(count(&ran), 0);
}

/// **Scenario**: A one-step sequence behaves like its only step.
#[tokio::test]
async fn single_step_sequence() {
    let seq = SequenceNode::new(PassthroughNode::new());
    let input = Value::map([("k", "v")]);
    assert_eq!(seq.invoke(input.clone()).await.unwrap(), input);
}

/// **Scenario**: then() appends a step to an existing sequence.
#[tokio::test]
async fn then_appends_step() {
    let seq = SequenceNode::new(append("-1")).then(append("-2"));
    assert_eq!(seq.steps().len(), 2);
    assert_eq!(seq.invoke(Value::from("x")).await.unwrap(), Value::from("x-1-2"));
}
