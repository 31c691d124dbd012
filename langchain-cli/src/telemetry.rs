//! Tracing setup for the binary.
//!
//! Logs go to stderr so pipeline output on stdout stays clean. `RUST_LOG` wins when
//! set; otherwise the level is `warn`, raised to `debug` for the pipeline crates with
//! `--verbose`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{Error, RunConfig};

/// Default filter directives when `RUST_LOG` is unset.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,langchain=debug,langchain_cli=debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber for `config`. Fails if one is already installed.
pub fn init_tracing(config: &RunConfig) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.verbose)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()?;
    Ok(())
}
