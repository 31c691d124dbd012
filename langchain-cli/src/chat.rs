//! Chat session with caller-owned history.
//!
//! The session owns its `Vec<Message>` and passes the whole history into the
//! pipeline on every turn; the pipeline itself keeps nothing between calls.

use std::io::Write;
use std::sync::Arc;

use langchain::{
    BuildError, ChatModel, Message, MessageTemplate, ModelNode, Node, ParserNode, PromptNode,
    Runnable, RunnableError, Value,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::Error;

/// Typing this ends an interactive session.
pub const EXIT_COMMAND: &str = "exit";

/// Multi-turn chat: `system` + history + the new user input.
pub struct ChatSession {
    chain: Node,
    history: Vec<Message>,
}

impl ChatSession {
    /// Fails if `system` is not a valid template (e.g. an unmatched `{`); escape literal
    /// braces as `{{` and `}}`.
    pub fn new(model: Arc<dyn ChatModel>, system: &str) -> Result<Self, BuildError> {
        let prompt = PromptNode::chat(vec![
            MessageTemplate::system(system)?,
            MessageTemplate::placeholder("history"),
            MessageTemplate::user("{input}")?,
        ]);
        Ok(Self {
            chain: prompt | ModelNode::new(model) | ParserNode::text(),
            history: Vec::new(),
        })
    }

    /// Sends one user turn and returns the reply. On failure the history is unchanged.
    pub async fn send(&mut self, input: &str) -> Result<String, RunnableError> {
        let reply = self
            .chain
            .invoke(Value::map([
                ("history", Value::from(self.history.clone())),
                ("input", Value::from(input)),
            ]))
            .await?
            .to_string();
        self.history.push(Message::user(input));
        self.history.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// User and assistant turns so far, oldest first (the system prompt is not included).
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Reads user lines from `input` until EOF or [`EXIT_COMMAND`], writing `AI: <reply>`
/// lines to `out`. Empty lines are skipped. A failed turn is reported on `out` and the
/// session continues.
pub async fn run_chat_repl<R, W>(
    session: &mut ChatSession,
    input: R,
    out: &mut W,
) -> Result<(), Error>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "You: ")?;
        out.flush()?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let text = line.trim();
        if text == EXIT_COMMAND {
            break;
        }
        if text.is_empty() {
            continue;
        }
        match session.send(text).await {
            Ok(reply) => writeln!(out, "AI: {}", reply)?,
            Err(e) => {
                tracing::warn!(error = %e, "Chat turn failed");
                writeln!(out, "error: {}", e)?
            }
        }
    }
    writeln!(out)?;
    Ok(())
}
