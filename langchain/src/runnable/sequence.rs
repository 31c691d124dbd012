//! Sequence combinator: output of step i is the input of step i + 1.

use async_trait::async_trait;

use crate::error::{BuildError, RunnableError};
use crate::value::Value;

use super::{Node, Runnable};

/// Runs its steps left to right and returns the last step's output.
///
/// Always holds at least one step. The first failing step aborts the sequence and its
/// error is returned as is; no partial result is produced. Step compatibility is not
/// checked up front, it surfaces as an error from the step that receives the wrong shape.
#[derive(Clone, Debug)]
pub struct SequenceNode {
    name: String,
    steps: Vec<Node>,
}

impl SequenceNode {
    /// Creates a one-step sequence; extend it with [`then`](Self::then).
    pub fn new(first: impl Into<Node>) -> Self {
        Self::from_nonempty(vec![first.into()])
    }

    /// Creates a sequence from an explicit step list. Fails when `steps` is empty.
    pub fn from_steps(steps: Vec<Node>) -> Result<Self, BuildError> {
        if steps.is_empty() {
            return Err(BuildError::EmptySequence);
        }
        Ok(Self::from_nonempty(steps))
    }

    pub(crate) fn from_nonempty(steps: Vec<Node>) -> Self {
        debug_assert!(!steps.is_empty());
        Self {
            name: "RunnableSequence".to_string(),
            steps,
        }
    }

    /// Appends a step.
    pub fn then(mut self, next: impl Into<Node>) -> Self {
        self.steps.push(next.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn steps(&self) -> &[Node] {
        &self.steps
    }

    pub(crate) fn into_steps(self) -> Vec<Node> {
        self.steps
    }
}

#[async_trait]
impl Runnable for SequenceNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        let mut value = input;
        for step in &self.steps {
            value = step.invoke(value).await?;
        }
        Ok(value)
    }
}
