//! Function adapter node.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RunnableError;
use crate::value::Value;

use super::Runnable;

/// Function wrapped by a [`LambdaNode`].
pub type LambdaFn = Arc<dyn Fn(Value) -> Result<Value, RunnableError> + Send + Sync>;

/// Wraps a plain function as a node.
///
/// The function's result, success or error, is returned unchanged.
#[derive(Clone)]
pub struct LambdaNode {
    name: String,
    func: LambdaFn,
}

impl LambdaNode {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, RunnableError> + Send + Sync + 'static,
    {
        Self {
            name: "RunnableLambda".to_string(),
            func: Arc::new(func),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Debug for LambdaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaNode").field("name", &self.name).finish()
    }
}

#[async_trait]
impl Runnable for LambdaNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        (self.func)(input)
    }
}
