//! Completion provider client and its configuration.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;

#[cfg(test)]
pub(crate) mod fake_provider;

pub use client::{CompletionClient, CompletionResult, NarrativeCompleter};
pub use config::CompletionConfig;
pub use error::{CompletionError, ConfigError};
