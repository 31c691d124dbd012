//! Shared helper nodes for pipeline tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use langchain::{LambdaNode, RunnableError, Value};

/// Uppercases string input.
pub fn upper() -> LambdaNode {
    LambdaNode::new(|v: Value| Ok(Value::from(v.to_string().to_uppercase()))).with_name("upper")
}

/// Appends `suffix` to string input.
pub fn append(suffix: &'static str) -> LambdaNode {
    LambdaNode::new(move |v: Value| Ok(Value::from(format!("{}{}", v, suffix))))
        .with_name(format!("append{}", suffix))
}

/// Always fails with `ExecutionFailed(message)`.
pub fn fail(message: &'static str) -> LambdaNode {
    LambdaNode::new(move |_| Err(RunnableError::ExecutionFailed(message.to_string())))
        .with_name(format!("fail:{}", message))
}

/// Returns `output` and counts how many times it ran.
pub fn counting(output: &'static str) -> (LambdaNode, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = counter.clone();
    let node = LambdaNode::new(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from(output))
    })
    .with_name(output);
    (node, counter)
}

pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
