//! Configuration for the completion provider.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::error::ConfigError;

/// Environment variable naming the provider.
pub const PROVIDER_ENV: &str = "LLM_PROVIDER";
/// Environment variable holding the completion endpoint URL.
pub const ENDPOINT_ENV: &str = "LLM_API_ENDPOINT";
/// Environment variable holding the bearer token.
pub const API_KEY_ENV: &str = "LLM_API_KEY";
/// Environment variable holding the model identifier.
pub const MODEL_ENV: &str = "LLM_MODEL";
/// Environment variable overriding the outbound timeout, in seconds.
pub const TIMEOUT_ENV: &str = "LLM_TIMEOUT_SECS";
/// Environment variable toggling lenient narrative extraction.
pub const LENIENT_ENV: &str = "LLM_LENIENT_EXTRACTION";

/// Default outbound request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider settings, loaded once at startup and read-only afterwards.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Provider name, lower-cased. Informational only.
    pub provider: String,
    /// Completion endpoint.
    pub api_endpoint: Url,
    api_key: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Upper bound on a single provider call.
    pub timeout: Duration,
    /// When set, a response without `choices[0].message.content` yields an
    /// empty narrative instead of an error.
    pub lenient_extraction: bool,
}

impl CompletionConfig {
    /// Create a config with default timeout and lenient extraction.
    ///
    /// # Errors
    /// Returns an error if `api_endpoint` is not a valid URL.
    pub fn new(
        api_endpoint: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            provider: String::new(),
            api_endpoint: Url::parse(api_endpoint)?,
            api_key: api_key.into(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            lenient_extraction: true,
        })
    }

    /// Load the config from process environment variables.
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the config through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let endpoint = required(ENDPOINT_ENV)?;
        let api_key = required(API_KEY_ENV)?;
        let model = required(MODEL_ENV)?;

        let mut config = Self::new(endpoint.trim(), api_key, model)?
            .with_provider(lookup(PROVIDER_ENV).unwrap_or_default());

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout = parse_timeout(&raw)?;
        }

        if let Some(raw) = lookup(LENIENT_ENV) {
            config.lenient_extraction = parse_flag(LENIENT_ENV, &raw)?;
        }

        Ok(config)
    }

    /// Set the provider name (stored lower-cased).
    #[must_use]
    pub fn with_provider(mut self, provider: impl AsRef<str>) -> Self {
        self.provider = provider.as_ref().trim().to_lowercase();
        self
    }

    /// Set the outbound timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose between lenient and strict narrative extraction.
    #[must_use]
    pub const fn with_lenient_extraction(mut self, lenient: bool) -> Self {
        self.lenient_extraction = lenient;
        self
    }

    /// Bearer token for the provider.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("provider", &self.provider)
            .field("api_endpoint", &self.api_endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("lenient_extraction", &self.lenient_extraction)
            .finish()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}
