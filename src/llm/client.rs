//! HTTP client for the chat completion provider.
//!
//! Behaviour:
//! - Build the fixed request payload around a single system prompt.
//! - Log the payload, then POST it once with a bearer token.
//! - Unwrap `choices[0].message.content`, or turn the failure into a
//!   [`CompletionResult::Error`] carrying the failure message and, for
//!   upstream failures, the raw response body.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::narration::PromptText;

use super::config::CompletionConfig;
use super::error::{CompletionError, ConfigError};
use super::payload::{CompletionRequestPayload, extract_content};

/// Outcome of one completion call. Exactly one of narrative or error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionResult {
    /// The provider produced narrative text.
    Success {
        /// Generated story text.
        narrative: String,
    },
    /// The call failed.
    Error {
        /// Failure description returned to the caller.
        message: String,
    },
}

impl CompletionResult {
    /// Whether the call succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<String, CompletionError>> for CompletionResult {
    fn from(result: Result<String, CompletionError>) -> Self {
        match result {
            Ok(narrative) => Self::Success { narrative },
            Err(err) => Self::Error {
                message: err.to_string(),
            },
        }
    }
}

/// Anything that can turn a prompt into narrative text.
#[async_trait]
pub trait NarrativeCompleter: Send + Sync {
    /// Run one completion for `prompt`.
    async fn complete(&self, prompt: &PromptText) -> CompletionResult;
}

/// Async client bound to one provider configuration.
#[derive(Clone, Debug)]
pub struct CompletionClient {
    client: reqwest::Client,
    config: Arc<CompletionConfig>,
}

impl CompletionClient {
    /// Create a client whose requests are bounded by `config.timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Arc<CompletionConfig>) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    async fn request_narrative(&self, prompt: &PromptText) -> Result<String, CompletionError> {
        let payload = CompletionRequestPayload::system(&self.config.model, prompt.as_str());
        log_payload(&payload);

        let response = self
            .client
            .post(self.config.api_endpoint.clone())
            .bearer_auth(self.config.api_key())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let failure = response.error_for_status_ref().err().map(|e| e.to_string());
        if let Some(message) = failure {
            let body = response.text().await.ok().filter(|text| !text.is_empty());
            return Err(CompletionError::Upstream { message, body });
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                CompletionError::Unexpected(e.to_string())
            }
        })?;
        let body: Value =
            serde_json::from_str(&text).map_err(|e| CompletionError::Unexpected(e.to_string()))?;

        match extract_content(&body) {
            Some(narrative) => Ok(narrative.to_owned()),
            None if self.config.lenient_extraction => {
                tracing::warn!(
                    provider = %self.config.provider,
                    "provider response has no choices[0].message.content; returning empty narrative"
                );
                Ok(String::new())
            }
            None => Err(CompletionError::MissingContent),
        }
    }

    fn transport_error(&self, err: &reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            self.timeout_error()
        } else {
            CompletionError::Upstream {
                message: err.to_string(),
                body: None,
            }
        }
    }

    fn timeout_error(&self) -> CompletionError {
        CompletionError::Timeout {
            after: self.config.timeout,
        }
    }
}

#[async_trait]
impl NarrativeCompleter for CompletionClient {
    async fn complete(&self, prompt: &PromptText) -> CompletionResult {
        let result = self.request_narrative(prompt).await;
        if let Err(err) = &result {
            log_failure(err);
        }
        result.into()
    }
}

fn log_payload(payload: &CompletionRequestPayload<'_>) {
    match serde_json::to_string(payload) {
        Ok(json) => tracing::info!(payload = %json, "sending completion request"),
        Err(e) => tracing::warn!("could not serialize completion payload for logging: {e}"),
    }
}

fn log_failure(err: &CompletionError) {
    match err {
        CompletionError::Upstream { message, body } => tracing::error!(
            body = body.as_deref().unwrap_or_default(),
            "completion request failed: {message}"
        ),
        _ if err.is_upstream() => tracing::error!("completion request failed: {err}"),
        _ => tracing::error!("completion failed: {err}"),
    }
}
