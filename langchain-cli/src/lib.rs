//! langchain-cli library: reusable run logic for the `langchain` binary and tests.
//!
//! Reads provider config from `.env`, builds one of the demo pipelines and runs it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), langchain_cli::Error> {
//! use langchain_cli::{run_demo, Demo, RunConfig, RunOptions};
//!
//! let mut config = RunConfig::from_env()?;
//! config.apply_options(&RunOptions { mock: true, ..Default::default() });
//! let out = run_demo(&Demo::Simple { topic: "UFC".into() }, &config, true).await?;
//! println!("{}", out.value);
//! # Ok(())
//! # }
//! ```

mod chat;
mod config;
pub mod pipelines;
mod provider;
mod run;
mod telemetry;

pub use chat::{run_chat_repl, ChatSession, EXIT_COMMAND};
pub use config::{Error, RunConfig, RunOptions};
pub use provider::build_chat_model;
pub use run::{run_demo, run_tool_call, Demo, RunOutput, MAX_TOOL_ROUNDS};
pub use telemetry::init_tracing;

#[cfg(test)]
mod tests;
