//! Branch combinator: route the input to the first case whose predicate holds.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RunnableError;
use crate::logging::log_branch_selected;
use crate::value::Value;

use super::{Node, Runnable};

/// Condition evaluated against a branch node's input.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Evaluates predicates in declaration order and invokes the node of the first one
/// that returns true; later predicates are not evaluated. Falls back to the default
/// node, or fails with `NoBranchMatched` when there is none.
///
/// A failure in the selected node is returned as is; no other case is tried.
#[derive(Clone)]
pub struct BranchNode {
    name: String,
    cases: Vec<(Predicate, Node)>,
    default: Option<Box<Node>>,
}

impl BranchNode {
    pub fn new() -> Self {
        Self {
            name: "RunnableBranch".to_string(),
            cases: Vec::new(),
            default: None,
        }
    }

    /// Adds a case after the existing ones.
    pub fn when<P>(mut self, predicate: P, node: impl Into<Node>) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.cases.push((Arc::new(predicate), node.into()));
        self
    }

    /// Sets the node used when no predicate matches.
    pub fn otherwise(mut self, node: impl Into<Node>) -> Self {
        self.default = Some(Box::new(node.into()));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Case nodes in declaration order.
    pub fn cases(&self) -> impl Iterator<Item = &Node> {
        self.cases.iter().map(|(_, node)| node)
    }

    pub fn default_node(&self) -> Option<&Node> {
        self.default.as_deref()
    }
}

impl fmt::Debug for BranchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BranchNode")
            .field("name", &self.name)
            .field("cases", &self.cases().collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}

impl Default for BranchNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Runnable for BranchNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        for (index, (predicate, node)) in self.cases.iter().enumerate() {
            if predicate(&input) {
                log_branch_selected(&self.name, Some(index));
                return node.invoke(input).await;
            }
        }
        match &self.default {
            Some(node) => {
                log_branch_selected(&self.name, None);
                node.invoke(input).await
            }
            None => Err(RunnableError::NoBranchMatched {
                node: self.name.clone(),
                input,
            }),
        }
    }
}
