//! Error types for the completion client.

use std::time::Duration;

use thiserror::Error;

/// Fallback detail used when the provider sent no response body.
pub const NO_RESPONSE_CONTENT: &str = "No response content";

/// Errors raised while loading the completion configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or blank.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    /// The provider endpoint is not a valid URL.
    #[error("invalid LLM_API_ENDPOINT: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The timeout is not a positive number of seconds.
    #[error("invalid LLM_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
    /// A boolean flag could not be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidFlag {
        /// Variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Failures of a single completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Non-2xx status or transport failure.
    #[error("{message}: {}", body_or_fallback(.body.as_deref()))]
    Upstream {
        /// Failure description.
        message: String,
        /// Raw response body, when one was received.
        body: Option<String>,
    },
    /// The provider did not answer within the configured timeout.
    #[error("provider request timed out after {}s: {}", .after.as_secs_f64(), NO_RESPONSE_CONTENT)]
    Timeout {
        /// Configured timeout.
        after: Duration,
    },
    /// The response lacked `choices[0].message.content` under strict extraction.
    #[error("provider response missing choices[0].message.content")]
    MissingContent,
    /// Any other failure while handling the response.
    #[error("{0}")]
    Unexpected(String),
}

impl CompletionError {
    /// Whether this failure came from the provider's HTTP exchange.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Timeout { .. })
    }
}

const fn body_or_fallback(body: Option<&str>) -> &str {
    match body {
        Some(text) if !text.is_empty() => text,
        _ => NO_RESPONSE_CONTENT,
    }
}
