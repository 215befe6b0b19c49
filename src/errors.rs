//! Error types for the pagehelper crate
//!
//! This module contains all error types that can be returned by pagehelper operations.

use config::ConfigError;
use page_context::ContextError;
use sql_modifier::ModifierError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageHelperError {
    #[error("Modifier error: {0}")]
    Modifier(#[from] ModifierError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request context error: {0}")]
    Context(#[from] ContextError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Page size {requested} exceeds the configured maximum of {max}")]
    PageSizeTooLarge { requested: u64, max: u64 },

    #[error("Count query returned a negative value: {0}")]
    NegativeCount(i64),

    #[error("Execution error: {0}")]
    Execution(String),
}
