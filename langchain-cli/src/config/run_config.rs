//! Run config: API base, key, model, temperature, timeout. Filled from env / .env.

use std::time::Duration;

use super::RunOptions;

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Run config. Can be filled from env / .env and overridden by [`RunOptions`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// OpenAI-compatible API base URL, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    /// API key; required unless `mock` is set.
    pub api_key: Option<String>,
    /// Model name, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Sampling temperature 0–2. Default: unset (use API default).
    pub temperature: Option<f32>,
    /// Per-call timeout for the model. Default: unset (no timeout).
    pub timeout: Option<Duration>,
    /// When true, use the scripted mock model.
    pub mock: bool,
    /// When true, show debug logs.
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            timeout: None,
            mock: false,
            verbose: false,
        }
    }
}

impl RunConfig {
    /// Fill config from env vars. Call `dotenv::dotenv().ok()` first to include `.env`.
    ///
    /// `OPENAI_API_BASE` and `OPENAI_MODEL` have defaults. `OPENAI_API_KEY`,
    /// `OPENAI_TEMPERATURE` and `OPENAI_TIMEOUT_SECS` are optional here; a missing key
    /// is reported by [`require_api_key`](Self::require_api_key) when a real provider
    /// is built.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = match std::env::var("OPENAI_TEMPERATURE") {
            Ok(s) => Some(s.trim().parse::<f32>().map_err(|e| {
                format!("OPENAI_TEMPERATURE must be a number, got {:?}: {}", s, e)
            })?),
            Err(_) => None,
        };
        let timeout = match std::env::var("OPENAI_TIMEOUT_SECS") {
            Ok(s) => Some(Duration::from_secs(s.trim().parse::<u64>().map_err(|e| {
                format!("OPENAI_TIMEOUT_SECS must be whole seconds, got {:?}: {}", s, e)
            })?)),
            Err(_) => None,
        };
        Ok(Self {
            api_base,
            api_key,
            model,
            temperature,
            timeout,
            mock: false,
            verbose: false,
        })
    }

    /// Apply optional overrides from `RunOptions` to this config.
    ///
    /// Only set fields in `options` override; `mock` and `verbose` are switched on
    /// when set and never switched off.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(model) = &options.model {
            self.model = model.clone();
        }
        if let Some(t) = options.temperature {
            self.temperature = Some(t);
        }
        if let Some(secs) = options.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if options.mock {
            self.mock = true;
        }
        if options.verbose {
            self.verbose = true;
        }
    }

    /// API key for a real provider.
    pub fn require_api_key(&self) -> Result<&str, Error> {
        self.api_key.as_deref().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "OPENAI_API_KEY is not set; please configure it in .env or run with --mock",
            )
            .into()
        })
    }

    /// One-line description for logs; never includes the key.
    pub fn summary(&self) -> String {
        if self.mock {
            return "provider=mock".to_string();
        }
        let mut s = format!("provider=openai base={} model={}", self.api_base, self.model);
        if let Some(t) = self.temperature {
            s.push_str(&format!(" temperature={}", t));
        }
        if let Some(timeout) = self.timeout {
            s.push_str(&format!(" timeout={}s", timeout.as_secs()));
        }
        s
    }
}
