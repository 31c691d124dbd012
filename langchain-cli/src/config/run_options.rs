//! Optional overrides for a run (CLI flags or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options). Callers (the
//! binary or tests) build a `RunOptions` and apply it on top of the env-based config.

/// Optional overrides: model, temperature, timeout, mock provider, verbosity.
///
/// Only set fields override the base config (from env).
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Override model name.
    pub model: Option<String>,
    /// Override sampling temperature (0–2).
    pub temperature: Option<f32>,
    /// Override per-call timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Use the scripted mock model instead of a real provider; no API key needed.
    pub mock: bool,
    /// Show debug logs for node invocations.
    pub verbose: bool,
}
