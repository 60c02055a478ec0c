//! Error types for line-bot-core

use thiserror::Error;

/// Main error type for line-bot-core
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable is missing or empty
    #[error("Please set {0}")]
    MissingEnv(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// The remote messaging API call failed; holds the client's message verbatim
    #[error("Remote call failed: {0}")]
    Remote(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for line-bot-core
pub type Result<T> = std::result::Result<T, Error>;
