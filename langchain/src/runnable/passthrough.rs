//! Identity node.

use async_trait::async_trait;

use crate::error::RunnableError;
use crate::value::Value;

use super::Runnable;

/// Returns its input unchanged.
///
/// Typically placed in a [`ParallelNode`](super::ParallelNode) to keep the upstream
/// value next to derived branches.
#[derive(Clone, Debug)]
pub struct PassthroughNode {
    name: String,
}

impl PassthroughNode {
    pub fn new() -> Self {
        Self {
            name: "RunnablePassthrough".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for PassthroughNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Runnable for PassthroughNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        Ok(input)
    }
}
