//! Mock chat model for tests and offline runs.
//!
//! Returns scripted responses without any network call, and records every message
//! list it receives so tests can assert what the model was sent.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::message::Message;

use super::{ChatModel, ChatResponse, ProviderError};

type ResponseFn = Arc<dyn Fn(&[Message]) -> Result<ChatResponse, ProviderError> + Send + Sync>;

#[derive(Clone)]
enum Behaviour {
    /// Replays the script in order, wrapping around at the end.
    Scripted(Vec<ChatResponse>),
    /// Replies with the content of the last message.
    Echo,
    Fail(ProviderError),
    Custom(ResponseFn),
}

/// Scripted [`ChatModel`].
///
/// `with_text(["a", "b"])` answers `a`, then `b`, then `a` again. Use [`calls`](Self::calls)
/// to inspect the exact messages of every call.
pub struct MockChatModel {
    name: String,
    behaviour: Behaviour,
    cursor: AtomicUsize,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockChatModel {
    fn build(behaviour: Behaviour) -> Self {
        Self {
            name: "MockChatModel".to_string(),
            behaviour,
            cursor: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replays `responses` in order (cycling). An empty script yields `EmptyResponse`.
    pub fn new(responses: Vec<ChatResponse>) -> Self {
        Self::build(Behaviour::Scripted(responses))
    }

    /// Text-only script.
    pub fn with_text<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(responses.into_iter().map(ChatResponse::text).collect())
    }

    /// Echoes the content of the last message back.
    pub fn echo() -> Self {
        Self::build(Behaviour::Echo)
    }

    /// Fails every call with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::build(Behaviour::Fail(error))
    }

    /// Computes each response from the messages sent.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[Message]) -> Result<ChatResponse, ProviderError> + Send + Sync + 'static,
    {
        Self::build(Behaviour::Custom(Arc::new(f)))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Every message list received so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn respond(&self, messages: &[Message]) -> Result<ChatResponse, ProviderError> {
        match &self.behaviour {
            Behaviour::Scripted(script) if script.is_empty() => Err(ProviderError::EmptyResponse),
            Behaviour::Scripted(script) => {
                let i = self.cursor.fetch_add(1, Ordering::SeqCst) % script.len();
                Ok(script[i].clone())
            }
            Behaviour::Echo => Ok(ChatResponse::text(
                messages.last().map(Message::content).unwrap_or_default(),
            )),
            Behaviour::Fail(error) => Err(error.clone()),
            Behaviour::Custom(f) => f(messages),
        }
    }
}

impl fmt::Debug for MockChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockChatModel")
            .field("name", &self.name)
            .field("calls", &self.call_count())
            .finish()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn model_name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, messages: &[Message]) -> Result<ChatResponse, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(messages.to_vec());
        self.respond(messages)
    }
}
