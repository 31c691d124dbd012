//! # LangChain for Rust
//!
//! A minimal, LangChain-inspired pipeline library. Build prompt → model → parser
//! chains out of a small, closed set of nodes with a single **value-in, value-out**
//! contract: every node takes one [`Value`] and returns one [`Value`].
//!
//! ## Design Principles
//!
//! - **One contract**: [`Runnable::invoke`] is the only execution entry point. Combinators
//!   and leaves are interchangeable wherever a node is expected.
//! - **Closed node set**: [`Node`] enumerates every node kind (prompt, model, parser,
//!   lambda, passthrough, sequence, parallel, branch) so tooling such as
//!   [`Node::draw_ascii`] can reason about a pipeline exhaustively.
//! - **Fail fast, never wrap**: the first failure aborts the pipeline and reaches the
//!   caller unchanged, naming the node that raised it.
//! - **No hidden state**: nodes are immutable once built. Chat history is a caller-owned
//!   list of [`Message`]s passed in on every call.
//!
//! ## Main Modules
//!
//! - [`runnable`]: [`Runnable`], [`Node`], and the combinators ([`SequenceNode`],
//!   [`ParallelNode`], [`BranchNode`], [`LambdaNode`], [`PassthroughNode`]).
//! - [`prompt`]: [`PromptNode`] text and chat templates with named slots.
//! - [`llm`]: [`ChatModel`] trait, [`ModelNode`], [`MockChatModel`], and `ChatOpenAI`
//!   (feature `openai`).
//! - [`parser`]: [`ParserNode`] for text, JSON and schema-validated output.
//! - [`schema`]: declarative field schemas and format-instruction rendering.
//! - [`tool`]: callable tools with schema-checked arguments.
//!
//! ## Features
//!
//! - `openai`: OpenAI-compatible chat completions via `async-openai`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use langchain::{MockChatModel, ModelNode, ParserNode, PromptNode, Runnable, Value};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Arc::new(MockChatModel::with_text(["Rust has no garbage collector."]));
//! let chain = PromptNode::new("Give me one fact about {topic}.")?
//!     | ModelNode::new(model)
//!     | ParserNode::text();
//!
//! let out = chain.invoke(Value::map([("topic", "Rust")])).await?;
//! println!("{}", out);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod llm;
mod logging;
pub mod message;
pub mod parser;
pub mod prompt;
pub mod runnable;
pub mod schema;
pub mod tool;
pub mod value;

pub use error::{BuildError, RunnableError};
pub use llm::{ChatModel, ChatResponse, MockChatModel, ModelNode, ProviderError};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use message::{Message, ToolCall};
pub use parser::{ParseFailure, ParserNode, JSON_FORMAT_INSTRUCTIONS};
pub use prompt::{MessageTemplate, PromptNode, Template};
pub use runnable::{
    BranchNode, LambdaNode, Node, NodeKind, ParallelNode, PassthroughNode, Runnable,
    SequenceNode,
};
pub use schema::{json_schema, render_instructions, FieldSchema, FieldType, InstructionStyle, Schema};
pub use tool::{Tool, ToolSpec, Toolkit};
pub use value::Value;
