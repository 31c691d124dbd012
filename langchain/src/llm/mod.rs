//! Chat model abstraction and the model node.
//!
//! [`ChatModel`] is the external collaborator: given messages, it returns assistant
//! text and optional tool calls. [`ModelNode`] adapts any `ChatModel` to the node
//! contract. Implementations: [`MockChatModel`] (scripted, for tests and offline
//! runs) and `ChatOpenAI` (feature `openai`).

mod error;
mod mock;
mod model_node;

#[cfg(feature = "openai")]
mod openai;

pub use error::ProviderError;
pub use mock::MockChatModel;
pub use model_node::ModelNode;

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::message::{Message, ToolCall};

/// Response from a chat completion: assistant text and optional tool calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatResponse {
    /// Assistant message content (plain text).
    pub content: String,
    /// Tool calls requested in this turn; empty when the model answered directly.
    pub tool_calls: Vec<ToolCall>,
}

impl ChatResponse {
    /// Text-only response.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    /// The response as an assistant message.
    pub fn into_message(self) -> Message {
        Message::Assistant {
            content: self.content,
            tool_calls: self.tool_calls,
        }
    }
}

/// Chat model: given messages, returns assistant text and optional tool calls.
///
/// One call per `generate`; implementations own transport, auth and any timeout.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, used as the default display name of a [`ModelNode`].
    fn model_name(&self) -> &str {
        "ChatModel"
    }

    /// Runs one completion over `messages`.
    async fn generate(&self, messages: &[Message]) -> Result<ChatResponse, ProviderError>;
}
