//! ParallelNode: same input to every branch, mapping keyed by branch name.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use langchain::{
    ChatModel, ChatResponse, Message, ModelNode, Node, ParallelNode, PassthroughNode,
    ProviderError, Runnable, RunnableError, Value,
};

use crate::common::{append, count, counting, fail, upper};

/// Chat model that waits before failing, so a later branch fails first in wall time.
struct SlowFailure;

#[async_trait]
impl ChatModel for SlowFailure {
    async fn generate(&self, _messages: &[Message]) -> Result<ChatResponse, ProviderError> {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Err(ProviderError::Transport("connection reset".into()))
    }
}

/// **Scenario**: Parallel({p: a, q: b}).invoke(x) == {p: a(x), q: b(x)}.
#[tokio::test]
async fn result_is_keyed_by_branch_name() {
    let x = Value::from("x");
    let (a, b) = (upper(), append("!"));
    let expected = Value::map([
        ("p", a.invoke(x.clone()).await.unwrap()),
        ("q", b.invoke(x.clone()).await.unwrap()),
    ]);

    let par = ParallelNode::new().branch("p", a).branch("q", b);
    assert_eq!(par.invoke(x).await.unwrap(), expected);
}

/// **Scenario**: Every branch receives the identical input value.
#[tokio::test]
async fn branches_share_input() {
    let input = Value::map([("topic", "rust")]);
    let par = ParallelNode::new()
        .branch("left", PassthroughNode::new())
        .branch("right", PassthroughNode::new());
    let out = par.invoke(input.clone()).await.unwrap();
    assert_eq!(out.get("left"), Some(&input));
    assert_eq!(out.get("right"), Some(&input));
    assert_eq!(out.as_map().map(|m| m.len()), Some(2));
}

/// **Scenario**: If any branch fails, the parallel node fails with that error.
#[tokio::test]
async fn one_failing_branch_fails_the_node() {
    let par = ParallelNode::new()
        .branch("ok", upper())
        .branch("bad", fail("branch down"));
    match par.invoke(Value::from("x")).await {
        Err(RunnableError::ExecutionFailed(msg)) => assert_eq!(msg, "branch down"),
        other => panic!("expected ExecutionFailed, got {:?}", other),
    }
}

/// **Scenario**: When several branches fail, the first in declaration order is reported,
/// even if a later branch failed sooner.
#[tokio::test]
async fn first_declared_failure_wins() {
    let slow = ModelNode::new(Arc::new(SlowFailure)).with_name("slow");
    let par = ParallelNode::new()
        .branch("first", slow)
        .branch("second", fail("fast"));
    match par.invoke(Value::from("x")).await {
        Err(RunnableError::Provider { node, source }) => {
            assert_eq!(node, "slow");
            assert_eq!(source, ProviderError::Transport("connection reset".into()));
        }
        other => panic!("expected Provider error from first branch, got {:?}", other),
    }
}

/// **Scenario**: Parallel output feeds the next step as a mapping.
#[tokio::test]
async fn parallel_inside_sequence() {
    let (tail, ran) = counting("done");
    let par = ParallelNode::new()
        .branch("original", PassthroughNode::new())
        .branch("shout", upper());
    let chain: Node = par | tail;
    assert_eq!(chain.invoke(Value::from("hi")).await.unwrap(), Value::from("done"));
    assert_eq!(count(&ran), 1);
}
