//! OpenAI Chat Completions client implementing [`ChatModel`] (ChatOpenAI).
//!
//! Requires `OPENAI_API_KEY` (or explicit config). Any OpenAI-compatible endpoint
//! works through `with_config` and a custom base URL. Optional tools enable tool
//! calling; the response may then carry `tool_calls`.

use std::time::Duration;

use async_trait::async_trait;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionMessageToolCall, ChatCompletionMessageToolCalls,
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestToolMessage, ChatCompletionRequestToolMessageContent,
        ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionTools,
        CreateChatCompletionRequestArgs, FunctionCall, FunctionObject,
    },
    Client,
};

use crate::message::{Message, ToolCall};
use crate::tool::ToolSpec;

use super::{ChatModel, ChatResponse, ProviderError};

/// OpenAI Chat Completions client.
///
/// Uses `OPENAI_API_KEY` from the environment by default, or the config passed to
/// [`ChatOpenAI::with_config`]. Each call is bounded by the optional timeout; an
/// expired call fails with [`ProviderError::Timeout`].
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
    timeout: Option<Duration>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::new(), model)
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self::with_client(Client::with_config(config), model)
    }

    fn with_client(client: Client<OpenAIConfig>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            tools: None,
            temperature: None,
            timeout: None,
        }
    }

    /// Set tools for this completion (enables tool_calls in response).
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Bound every call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System { content } => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(content.as_str()),
                ),
                Message::User { content } => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(content.as_str()),
                ),
                Message::Assistant {
                    content,
                    tool_calls,
                } => {
                    let calls: Vec<ChatCompletionMessageToolCalls> = tool_calls
                        .iter()
                        .map(|tc| {
                            ChatCompletionMessageToolCalls::Function(ChatCompletionMessageToolCall {
                                id: tc.id.clone().unwrap_or_default(),
                                function: FunctionCall {
                                    name: tc.name.clone(),
                                    arguments: tc.arguments.clone(),
                                },
                            })
                        })
                        .collect();
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            content.clone(),
                        )),
                        tool_calls: (!calls.is_empty()).then_some(calls),
                        ..Default::default()
                    })
                }
                Message::Tool {
                    content,
                    tool_call_id,
                } => ChatCompletionRequestMessage::Tool(ChatCompletionRequestToolMessage {
                    content: ChatCompletionRequestToolMessageContent::Text(content.clone()),
                    tool_call_id: tool_call_id.clone().unwrap_or_default(),
                }),
            })
            .collect()
    }

    async fn complete(&self, messages: &[Message]) -> Result<ChatResponse, ProviderError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));

        if let Some(ref tools) = self.tools {
            let chat_tools: Vec<ChatCompletionTools> = tools
                .iter()
                .map(|t| {
                    ChatCompletionTools::Function(ChatCompletionTool {
                        function: FunctionObject {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: Some(t.input_schema.clone()),
                            ..Default::default()
                        },
                    })
                })
                .collect();
            args.tools(chat_tools);
        }

        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args
            .build()
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        let msg = choice.message;
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    Some(ToolCall {
                        id: Some(f.id),
                        name: f.function.name,
                        arguments: f.function.arguments,
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(ChatResponse {
            content: msg.content.unwrap_or_default(),
            tool_calls,
        })
    }
}

/// Classifies an async-openai error into a [`ProviderError`] kind.
fn map_openai_error(err: OpenAIError) -> ProviderError {
    match err {
        OpenAIError::ApiError(api) => {
            let code = api.code.as_deref().unwrap_or_default();
            let kind = api.r#type.as_deref().unwrap_or_default();
            if code == "invalid_api_key" || kind == "authentication_error" {
                ProviderError::Authentication(api.message)
            } else if code == "rate_limit_exceeded" || kind == "rate_limit_error" {
                ProviderError::RateLimited(api.message)
            } else {
                ProviderError::Api(api.message)
            }
        }
        OpenAIError::Reqwest(e) => ProviderError::Transport(e.to_string()),
        OpenAIError::InvalidArgument(msg) => ProviderError::InvalidRequest(msg),
        other => ProviderError::Api(other.to_string()),
    }
}

#[async_trait]
impl ChatModel for ChatOpenAI {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, messages: &[Message]) -> Result<ChatResponse, ProviderError> {
        tracing::debug!(model = %self.model, messages = messages.len(), "Calling chat completions");
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.complete(messages))
                .await
                .map_err(|_| ProviderError::Timeout(limit))?,
            None => self.complete(messages).await,
        }
    }
}
