//! Parallel combinator: fan one input out to named branches.

use async_trait::async_trait;
use futures::stream::{FuturesOrdered, TryStreamExt};

use crate::error::RunnableError;
use crate::logging::log_parallel_fan_out;
use crate::value::Value;

use super::{Node, Runnable};

/// Runs every branch on a copy of the same input and returns a mapping from branch
/// name to branch output.
///
/// Branches are polled concurrently on the calling task. Results are consumed in
/// declaration order: if any branch fails, the reported error is the one from the
/// earliest-declared failing branch, and branches still pending at that point are
/// dropped. The result's key set is exactly the declared branch names.
#[derive(Clone, Debug)]
pub struct ParallelNode {
    name: String,
    branches: Vec<(String, Node)>,
}

impl ParallelNode {
    pub fn new() -> Self {
        Self {
            name: "RunnableParallel".to_string(),
            branches: Vec::new(),
        }
    }

    /// Adds a named branch. Reusing a name replaces that branch in place.
    pub fn branch(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        let key = key.into();
        let node = node.into();
        match self.branches.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = node,
            None => self.branches.push((key, node)),
        }
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Branches in declaration order.
    pub fn branches(&self) -> &[(String, Node)] {
        &self.branches
    }
}

impl Default for ParallelNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Runnable for ParallelNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        log_parallel_fan_out(&self.name, self.branches.len());
        let pending: FuturesOrdered<_> = self
            .branches
            .iter()
            .map(|(key, node)| {
                let input = input.clone();
                async move { node.invoke(input).await.map(|out| (key.clone(), out)) }
            })
            .collect();
        let outputs: Vec<(String, Value)> = pending.try_collect().await?;
        Ok(Value::Map(outputs.into_iter().collect()))
    }
}
