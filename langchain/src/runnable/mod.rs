//! Node contract and composition primitives.
//!
//! [`Runnable`] is the uniform `invoke(Value) -> Value` contract. [`Node`] is the
//! closed set of node kinds a pipeline can be built from; combinators own their
//! children as `Node`s. Compose with [`Node::pipe`] or the `|` operator:
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use langchain::{MockChatModel, ModelNode, ParserNode, PromptNode};
//! # fn build() -> Result<langchain::Node, langchain::BuildError> {
//! let model = Arc::new(MockChatModel::echo());
//! let chain = PromptNode::new("Write a joke about {topic}")? | ModelNode::new(model) | ParserNode::text();
//! # Ok(chain)
//! # }
//! ```

mod branch;
mod graph;
mod lambda;
mod parallel;
mod passthrough;
mod sequence;

use std::fmt;
use std::ops::BitOr;

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::RunnableError;
use crate::llm::ModelNode;
use crate::logging::{log_invoke_complete, log_invoke_error, log_invoke_start};
use crate::parser::ParserNode;
use crate::prompt::PromptNode;
use crate::value::Value;

pub use branch::{BranchNode, Predicate};
pub use lambda::{LambdaFn, LambdaNode};
pub use parallel::ParallelNode;
pub use passthrough::PassthroughNode;
pub use sequence::SequenceNode;

/// Uniform invocation contract: one value in, one value out.
///
/// Implemented by every node type and by [`Node`]. Callers see a single awaited
/// result; nodes may run children concurrently internally.
#[async_trait]
pub trait Runnable: Send + Sync {
    /// Display name used in errors, logs and [`Node::draw_ascii`].
    fn name(&self) -> &str;

    /// Transforms `input` into an output value, or fails with the first error encountered.
    async fn invoke(&self, input: Value) -> Result<Value, RunnableError>;
}

/// Kind tag of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Prompt,
    Model,
    Parser,
    Lambda,
    Passthrough,
    Sequence,
    Parallel,
    Branch,
}

impl NodeKind {
    /// Leaves have no children; combinators compose other nodes.
    pub fn is_leaf(self) -> bool {
        !matches!(
            self,
            NodeKind::Sequence | NodeKind::Parallel | NodeKind::Branch
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Prompt => "prompt",
            NodeKind::Model => "model",
            NodeKind::Parser => "parser",
            NodeKind::Lambda => "lambda",
            NodeKind::Passthrough => "passthrough",
            NodeKind::Sequence => "sequence",
            NodeKind::Parallel => "parallel",
            NodeKind::Branch => "branch",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipeline node: exactly one of the supported node kinds.
///
/// Immutable once built; cloning copies the tree (model clients and functions are shared).
#[derive(Clone)]
pub enum Node {
    Prompt(PromptNode),
    Model(ModelNode),
    Parser(ParserNode),
    Lambda(LambdaNode),
    Passthrough(PassthroughNode),
    Sequence(SequenceNode),
    Parallel(ParallelNode),
    Branch(BranchNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Prompt(_) => NodeKind::Prompt,
            Node::Model(_) => NodeKind::Model,
            Node::Parser(_) => NodeKind::Parser,
            Node::Lambda(_) => NodeKind::Lambda,
            Node::Passthrough(_) => NodeKind::Passthrough,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Parallel(_) => NodeKind::Parallel,
            Node::Branch(_) => NodeKind::Branch,
        }
    }

    fn as_runnable(&self) -> &dyn Runnable {
        match self {
            Node::Prompt(n) => n,
            Node::Model(n) => n,
            Node::Parser(n) => n,
            Node::Lambda(n) => n,
            Node::Passthrough(n) => n,
            Node::Sequence(n) => n,
            Node::Parallel(n) => n,
            Node::Branch(n) => n,
        }
    }

    /// Replaces the display name of the wrapped node.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        match self {
            Node::Prompt(n) => Node::Prompt(n.with_name(name)),
            Node::Model(n) => Node::Model(n.with_name(name)),
            Node::Parser(n) => Node::Parser(n.with_name(name)),
            Node::Lambda(n) => Node::Lambda(n.with_name(name)),
            Node::Passthrough(n) => Node::Passthrough(n.with_name(name)),
            Node::Sequence(n) => Node::Sequence(n.with_name(name)),
            Node::Parallel(n) => Node::Parallel(n.with_name(name)),
            Node::Branch(n) => Node::Branch(n.with_name(name)),
        }
    }

    /// Chains `next` after this node. Nested sequences are flattened, so
    /// `a | b | c` is one three-step [`SequenceNode`].
    pub fn pipe(self, next: impl Into<Node>) -> Node {
        let mut steps = match self {
            Node::Sequence(seq) => seq.into_steps(),
            other => vec![other],
        };
        match next.into() {
            Node::Sequence(seq) => steps.extend(seq.into_steps()),
            other => steps.push(other),
        }
        Node::Sequence(SequenceNode::from_nonempty(steps))
    }

    /// Invokes this node once per input, concurrently. Results keep input order;
    /// one failing input does not affect the others.
    pub async fn batch(&self, inputs: Vec<Value>) -> Vec<Result<Value, RunnableError>> {
        join_all(inputs.into_iter().map(|input| self.invoke(input))).await
    }

    /// Runs `invoke` to completion on a fresh current-thread runtime.
    ///
    /// For synchronous callers only; panics if called from inside a tokio runtime.
    pub fn invoke_blocking(&self, input: Value) -> Result<Value, RunnableError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RunnableError::ExecutionFailed(format!("failed to start runtime: {}", e)))?;
        runtime.block_on(self.invoke(input))
    }
}

#[async_trait]
impl Runnable for Node {
    fn name(&self) -> &str {
        self.as_runnable().name()
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        let kind = self.kind();
        log_invoke_start(kind, self.name());
        let result = self.as_runnable().invoke(input).await;
        match &result {
            Ok(_) => log_invoke_complete(kind, self.name()),
            Err(e) => log_invoke_error(kind, self.name(), e),
        }
        result
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

impl<T: Into<Node>> BitOr<T> for Node {
    type Output = Node;

    fn bitor(self, rhs: T) -> Node {
        self.pipe(rhs)
    }
}

macro_rules! node_variant {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::$variant(node)
                }
            }

            impl<T: Into<Node>> BitOr<T> for $ty {
                type Output = Node;

                fn bitor(self, rhs: T) -> Node {
                    Node::from(self).pipe(rhs)
                }
            }
        )*
    };
}

node_variant! {
    PromptNode => Prompt,
    ModelNode => Model,
    ParserNode => Parser,
    LambdaNode => Lambda,
    PassthroughNode => Passthrough,
    SequenceNode => Sequence,
    ParallelNode => Parallel,
    BranchNode => Branch,
}
