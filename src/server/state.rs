//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::llm::{CompletionClient, CompletionConfig, ConfigError};
use crate::relay::PromptRelay;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Relay serving the narration endpoint.
    pub relay: PromptRelay,
}

impl AppState {
    /// Create state around an existing relay.
    #[must_use]
    pub fn new(relay: PromptRelay) -> Arc<Self> {
        Arc::new(Self { relay })
    }

    /// Create state backed by a provider client for `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: CompletionConfig) -> Result<Arc<Self>, ConfigError> {
        let client = CompletionClient::new(Arc::new(config))?;
        Ok(Self::new(PromptRelay::new(Arc::new(client))))
    }
}
