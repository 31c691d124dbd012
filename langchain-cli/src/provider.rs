//! Builds the chat model for a run: the scripted mock or a real provider.

use std::sync::Arc;

use langchain::{ChatModel, MockChatModel, ToolSpec};

use crate::config::{Error, RunConfig};

/// Returns the mock from `mock` when `config.mock` is set, otherwise an
/// OpenAI-compatible client with `tools` bound.
///
/// Fails when a real provider is requested without an API key, or when the binary
/// was built without the `openai` feature.
pub fn build_chat_model(
    config: &RunConfig,
    tools: Vec<ToolSpec>,
    mock: impl FnOnce() -> MockChatModel,
) -> Result<Arc<dyn ChatModel>, Error> {
    if config.mock {
        tracing::debug!("Using mock chat model");
        return Ok(Arc::new(mock()));
    }
    build_remote(config, tools)
}

#[cfg(feature = "openai")]
fn build_remote(config: &RunConfig, tools: Vec<ToolSpec>) -> Result<Arc<dyn ChatModel>, Error> {
    use async_openai::config::OpenAIConfig;
    use langchain::ChatOpenAI;

    let openai_config = OpenAIConfig::new()
        .with_api_base(&config.api_base)
        .with_api_key(config.require_api_key()?);

    let mut llm = ChatOpenAI::with_config(openai_config, config.model.clone());
    if !tools.is_empty() {
        llm = llm.with_tools(tools);
    }
    if let Some(t) = config.temperature {
        llm = llm.with_temperature(t);
    }
    if let Some(timeout) = config.timeout {
        llm = llm.with_timeout(timeout);
    }
    tracing::debug!(summary = %config.summary(), "Using OpenAI-compatible chat model");
    Ok(Arc::new(llm))
}

#[cfg(not(feature = "openai"))]
fn build_remote(config: &RunConfig, _tools: Vec<ToolSpec>) -> Result<Arc<dyn ChatModel>, Error> {
    config.require_api_key()?;
    Err("built without the `openai` feature; run with --mock or rebuild with --features openai".into())
}
