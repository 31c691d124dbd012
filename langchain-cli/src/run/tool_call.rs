//! Tool-calling loop: ask, run requested tools, answer.

use std::sync::Arc;

use langchain::{ChatModel, Message, ModelNode, Runnable, Toolkit, Value};

use super::Error;

/// Upper bound on model turns that request tools before giving up.
pub const MAX_TOOL_ROUNDS: usize = 5;

/// Sends `question`, executes every tool call the model requests, and feeds the tool
/// messages back until the model answers without tool calls.
///
/// Returns the full conversation; the last message is the final answer. The
/// conversation lives on this call's stack only.
pub async fn run_tool_call(
    model: Arc<dyn ChatModel>,
    toolkit: &Toolkit,
    question: &str,
) -> Result<Vec<Message>, Error> {
    let node = ModelNode::new(model);
    let mut messages = vec![Message::user(question)];

    for round in 0..=MAX_TOOL_ROUNDS {
        let reply = node.invoke(Value::from(messages.clone())).await?;
        let assistant = match reply {
            Value::Message(m) => m,
            other => return Err(format!("model returned {}, not a message", other.type_name()).into()),
        };
        let calls = assistant.tool_calls().to_vec();
        messages.push(assistant);
        if calls.is_empty() {
            return Ok(messages);
        }
        if round == MAX_TOOL_ROUNDS {
            break;
        }
        for call in &calls {
            tracing::debug!(tool = %call.name, arguments = %call.arguments, "Model requested tool");
            messages.push(toolkit.call(call)?);
        }
    }
    Err(format!("model still requested tools after {} rounds", MAX_TOOL_ROUNDS).into())
}
