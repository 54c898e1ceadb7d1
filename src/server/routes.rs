//! HTTP route handlers for the dungeon narration API.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use crate::narration::CampaignContext;
use crate::relay::{RelayBody, RelayResponse};

use super::state::AppState;

/// Path of the narration endpoint.
pub const DUNGEON_PATH: &str = "/api/dungeon";

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(DUNGEON_PATH, post(dungeon_narration))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "dungeon-narrator",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    RelayResponse {
        status,
        body: RelayBody::Error { error },
    }
    .into_response()
}

/// Validate the campaign fields and relay them to the provider.
async fn dungeon_narration(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!("rejected narration request: {rejection}");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let context = match CampaignContext::from_json(&body) {
        Ok(context) => context,
        Err(e) => {
            tracing::warn!("invalid narration request: {e}");
            let status = if e.is_field_error() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::BAD_REQUEST
            };
            return error_response(status, e.to_string());
        }
    };

    state.relay.relay(&context).await.into_response()
}
