//! Campaign context received from the caller.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Request field names in canonical order.
pub const FIELD_NAMES: [&str; 6] = [
    "world_context",
    "genre",
    "difficulty",
    "narrative_tone",
    "campaign_name",
    "user_question",
];

/// Errors raised while validating an inbound campaign request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The request body is not a JSON object.
    #[error("Request body must be a JSON object")]
    NotAnObject,
    /// A required field is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    /// A required field is present but not a string.
    #[error("Field {0} must be a string")]
    NotAString(&'static str),
}

impl ValidationError {
    /// Whether the error concerns a field rather than the body shape.
    #[must_use]
    pub const fn is_field_error(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::NotAString(_))
    }
}

/// The six narrative settings describing one role-playing request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignContext {
    /// Description of the world the story takes place in.
    pub world_context: String,
    /// Genre of the campaign.
    pub genre: String,
    /// Difficulty setting.
    pub difficulty: String,
    /// Tone the narration should keep.
    pub narrative_tone: String,
    /// Name of the campaign.
    pub campaign_name: String,
    /// What the player says or does.
    pub user_question: String,
}

impl CampaignContext {
    /// Validate a JSON request body and build a context from it.
    ///
    /// Fields are checked in canonical order; the first failure is returned.
    /// Fields outside the six known names are ignored.
    ///
    /// # Errors
    /// Returns an error if the body is not an object, or a field is missing
    /// or not a string.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let object = body.as_object().ok_or(ValidationError::NotAnObject)?;

        let mut values: [String; 6] = Default::default();
        for (slot, name) in values.iter_mut().zip(FIELD_NAMES) {
            match object.get(name) {
                None => return Err(ValidationError::MissingField(name)),
                Some(Value::String(text)) => slot.clone_from(text),
                Some(_) => return Err(ValidationError::NotAString(name)),
            }
        }

        let [
            world_context,
            genre,
            difficulty,
            narrative_tone,
            campaign_name,
            user_question,
        ] = values;

        Ok(Self {
            world_context,
            genre,
            difficulty,
            narrative_tone,
            campaign_name,
            user_question,
        })
    }

    /// Build a context from a field map, treating absent fields as empty.
    #[must_use]
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
        Self {
            world_context: field("world_context"),
            genre: field("genre"),
            difficulty: field("difficulty"),
            narrative_tone: field("narrative_tone"),
            campaign_name: field("campaign_name"),
            user_question: field("user_question"),
        }
    }
}
