//! Campaign input and prompt construction.

pub mod context;
pub mod prompt;

pub use context::{CampaignContext, ValidationError};
pub use prompt::{PromptText, build_prompt};
