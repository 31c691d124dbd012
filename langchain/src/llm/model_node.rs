//! Model node: sends a prompt to a chat model.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RunnableError;
use crate::message::Message;
use crate::runnable::Runnable;
use crate::value::Value;

use super::ChatModel;

/// Calls a [`ChatModel`] and returns its reply as `Value::Message(Message::Assistant { .. })`.
///
/// Accepts a string (sent as one user message), a message, or a list of messages
/// (chat history). Provider failures surface as `RunnableError::Provider`.
#[derive(Clone)]
pub struct ModelNode {
    name: String,
    model: Arc<dyn ChatModel>,
}

impl ModelNode {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            name: model.model_name().to_string(),
            model,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn model(&self) -> &Arc<dyn ChatModel> {
        &self.model
    }

    fn to_messages(&self, input: Value) -> Result<Vec<Message>, RunnableError> {
        match input {
            Value::String(text) => Ok(vec![Message::user(text)]),
            Value::Message(message) => Ok(vec![message]),
            other => other
                .to_messages()
                .filter(|messages| !messages.is_empty())
                .ok_or_else(|| RunnableError::InvalidInput {
                    node: self.name.clone(),
                    expected: "a prompt string or a non-empty list of messages",
                    input: other,
                }),
        }
    }
}

impl fmt::Debug for ModelNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelNode")
            .field("name", &self.name)
            .field("model", &self.model.model_name())
            .finish()
    }
}

#[async_trait]
impl Runnable for ModelNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        let messages = self.to_messages(input)?;
        let response = self
            .model
            .generate(&messages)
            .await
            .map_err(|source| RunnableError::Provider {
                node: self.name.clone(),
                source,
            })?;
        Ok(Value::Message(response.into_message()))
    }
}
