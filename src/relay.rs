//! Prompt relay: campaign context in, narrative (or error) response out.

use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::llm::{CompletionResult, NarrativeCompleter};
use crate::narration::{CampaignContext, build_prompt};

/// JSON body returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RelayBody {
    /// Successful narration.
    Narrative {
        /// Generated story text.
        narrative: String,
    },
    /// Failed narration.
    Error {
        /// Failure description.
        error: String,
    },
}

/// Completed relay: status code plus body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayResponse {
    /// HTTP status for the caller.
    pub status: StatusCode,
    /// Response body.
    pub body: RelayBody,
}

impl From<CompletionResult> for RelayResponse {
    fn from(result: CompletionResult) -> Self {
        match result {
            CompletionResult::Success { narrative } => Self {
                status: StatusCode::OK,
                body: RelayBody::Narrative { narrative },
            },
            CompletionResult::Error { message } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: RelayBody::Error { error: message },
            },
        }
    }
}

/// Builds the prompt for a request and hands it to a completer.
#[derive(Clone)]
pub struct PromptRelay {
    completer: Arc<dyn NarrativeCompleter>,
}

impl PromptRelay {
    /// Create a relay around `completer`.
    #[must_use]
    pub fn new(completer: Arc<dyn NarrativeCompleter>) -> Self {
        Self { completer }
    }

    /// Narrate one request.
    pub async fn relay(&self, context: &CampaignContext) -> RelayResponse {
        let span = tracing::info_span!(
            "relay",
            request_id = %Uuid::new_v4(),
            campaign = %context.campaign_name
        );

        async {
            let prompt = build_prompt(context);
            let result = self.completer.complete(&prompt).await;
            if result.is_success() {
                tracing::info!("narration completed");
            } else {
                tracing::warn!("narration failed");
            }
            RelayResponse::from(result)
        }
        .instrument(span)
        .await
    }
}
