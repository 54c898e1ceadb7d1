//! Wire types exchanged with the completion provider.

use serde::Serialize;
use serde_json::Value;

/// Token budget for each narration.
pub const MAX_TOKENS: u32 = 150;
/// Sampling temperature for each narration.
pub const TEMPERATURE: f32 = 0.7;

/// JSON pointer to the narrative inside a chat completion response.
const CONTENT_POINTER: &str = "/choices/0/message/content";

/// A single chat message.
#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    /// Message role.
    pub role: &'a str,
    /// Message text.
    pub content: &'a str,
}

/// Body of a chat completion request.
#[derive(Debug, Serialize)]
pub struct CompletionRequestPayload<'a> {
    /// Model identifier.
    pub model: &'a str,
    /// Conversation; always one system message.
    pub messages: [ChatMessage<'a>; 1],
    /// Output token budget.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl<'a> CompletionRequestPayload<'a> {
    /// Build the payload for a system prompt.
    #[must_use]
    pub const fn system(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: [ChatMessage {
                role: "system",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// Extract `choices[0].message.content` when present as a string.
#[must_use]
pub fn extract_content(response: &Value) -> Option<&str> {
    response.pointer(CONTENT_POINTER).and_then(Value::as_str)
}
