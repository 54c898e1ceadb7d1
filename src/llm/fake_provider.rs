//! In-process chat completion provider used by tests.

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Serve `router` on an ephemeral local port and return the completions URL.
pub async fn spawn(router: Router) -> std::io::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{addr}{COMPLETIONS_PATH}"))
}

/// A completions URL on a port nothing listens on.
pub async fn unused_endpoint() -> std::io::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}{COMPLETIONS_PATH}"))
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Answers with `messages[0].content` as the narrative.
pub fn echo() -> Router {
    Router::new().route(
        COMPLETIONS_PATH,
        post(|Json(body): Json<Value>| async move {
            let content = body["messages"][0]["content"].as_str().unwrap_or_default();
            Json(completion(content))
        }),
    )
}

/// Answers with a summary of the request headers and payload fields,
/// joined by `|`.
pub fn inspect() -> Router {
    Router::new().route(
        COMPLETIONS_PATH,
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let header_text = |name: header::HeaderName| {
                headers
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            };
            let summary = [
                header_text(header::AUTHORIZATION),
                header_text(header::CONTENT_TYPE),
                body["model"].as_str().unwrap_or_default().to_string(),
                body["messages"][0]["role"].as_str().unwrap_or_default().to_string(),
                body["max_tokens"].to_string(),
                body["temperature"].to_string(),
            ]
            .join("|");
            Json(completion(&summary))
        }),
    )
}

/// Answers every request with `status` and a plain-text `body`.
pub fn status(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(COMPLETIONS_PATH, post(move || async move { (status, body) }))
}

/// Answers every request with `body` as JSON.
pub fn respond_json(body: Value) -> Router {
    Router::new().route(
        COMPLETIONS_PATH,
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    )
}

/// Answers with a fixed narrative.
pub fn narrate(narrative: &'static str) -> Router {
    respond_json(completion(narrative))
}

/// Sleeps for `delay` before answering.
pub fn slow(delay: Duration) -> Router {
    Router::new().route(
        COMPLETIONS_PATH,
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(completion("too late"))
        }),
    )
}
