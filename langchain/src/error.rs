//! Error types for building and invoking pipelines.
//!
//! [`RunnableError`] is returned by every `Runnable::invoke`. Combinators pass it
//! through untouched, so the variant and the `node` name always identify where the
//! failure happened. [`BuildError`] covers invalid construction (templates, schemas,
//! tools) and is returned before anything runs.

use thiserror::Error;

use crate::llm::ProviderError;
use crate::parser::ParseFailure;
use crate::value::Value;

/// Invocation error.
///
/// Each variant carries the display name of the failing node and, where there is
/// one, the raw input or text that triggered the failure.
#[derive(Debug, Error)]
pub enum RunnableError {
    /// A prompt input mapping lacks a required slot.
    #[error("{node}: missing variable `{variable}` in prompt input")]
    MissingVariable {
        node: String,
        variable: String,
        input: Value,
    },

    /// The external model call failed (auth, rate limit, transport, timeout, ...).
    #[error("{node}: provider call failed: {source}")]
    Provider {
        node: String,
        #[source]
        source: ProviderError,
    },

    /// Model output did not conform to the expected shape.
    #[error("{node}: failed to parse output: {source}")]
    Parse {
        node: String,
        raw: String,
        #[source]
        source: ParseFailure,
    },

    /// A branch node found no matching predicate and has no default.
    #[error("{node}: no branch matched and no default is configured")]
    NoBranchMatched { node: String, input: Value },

    /// The input value has the wrong shape for the node.
    #[error("{node}: expected {expected}, got {}", .input.type_name())]
    InvalidInput {
        node: String,
        expected: &'static str,
        input: Value,
    },

    /// Raised by user code (lambdas, tools).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

impl RunnableError {
    /// Display name of the node that raised the error; `None` for user-raised failures.
    pub fn node(&self) -> Option<&str> {
        match self {
            RunnableError::MissingVariable { node, .. }
            | RunnableError::Provider { node, .. }
            | RunnableError::Parse { node, .. }
            | RunnableError::NoBranchMatched { node, .. }
            | RunnableError::InvalidInput { node, .. } => Some(node),
            RunnableError::ExecutionFailed(_) => None,
        }
    }
}

/// Error when constructing a node, schema or tool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Template braces are unbalanced or a slot name is not an identifier.
    #[error("invalid template at byte {position}: {message}")]
    InvalidTemplate { position: usize, message: String },

    /// A sequence needs at least one step.
    #[error("sequence must contain at least one step")]
    EmptySequence,

    /// Two schema fields share a name.
    #[error("duplicate schema field: {0}")]
    DuplicateField(String),

    /// Tool name or description is unusable.
    #[error("invalid tool definition: {0}")]
    InvalidTool(String),
}
