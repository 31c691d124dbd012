//! Run entry points: pick a demo, build its model and pipeline, invoke once.
//!
//! Re-exports [`Demo`], [`run_demo`], [`run_tool_call`] and [`Error`].

pub use crate::config::Error;

mod demo;
mod tool_call;

pub use demo::Demo;
pub use tool_call::{run_tool_call, MAX_TOOL_ROUNDS};

use langchain::{Runnable, Toolkit, Value};

use crate::config::RunConfig;
use crate::pipelines::multiply_tool;
use crate::provider::build_chat_model;

/// What a demo run produced.
#[derive(Debug)]
pub struct RunOutput {
    /// Pipeline tree, when requested.
    pub graph: Option<String>,
    /// Final value (for tool calls: the final assistant answer).
    pub value: Value,
}

/// Runs one non-interactive demo with `config`.
///
/// When `draw_graph` is set, the pipeline tree is rendered before invoking. Fails with
/// an error for [`Demo::Chat`], which needs a terminal session.
pub async fn run_demo(demo: &Demo, config: &RunConfig, draw_graph: bool) -> Result<RunOutput, Error> {
    tracing::debug!(demo = demo.name(), config = %config.summary(), "Running demo");

    if let Demo::ToolCall { question } = demo {
        let toolkit = Toolkit::new([multiply_tool()?])?;
        let model = build_chat_model(config, toolkit.specs(), || demo.mock_model())?;
        let messages = run_tool_call(model, &toolkit, question).await?;
        let value = messages
            .last()
            .cloned()
            .map(Value::Message)
            .unwrap_or_default();
        return Ok(RunOutput { graph: None, value });
    }

    let model = build_chat_model(config, Vec::new(), || demo.mock_model())?;
    let pipeline = demo
        .build(&model)?
        .ok_or_else(|| format!("`{}` is interactive; run it from a terminal", demo.name()))?;
    let graph = draw_graph.then(|| pipeline.draw_ascii());
    let value = pipeline.invoke(demo.input()).await?;
    Ok(RunOutput { graph, value })
}
