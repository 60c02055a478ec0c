//! エラー型定義 (line-bot-api)

use thiserror::Error;

/// line-bot-api のエラー型
#[derive(Error, Debug)]
pub enum LineError {
    #[error("LINE API error: {0}")]
    ApiError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid user ID: {0:?}")]
    InvalidUserId(String),

    #[error("Channel access token not configured")]
    AccessTokenNotConfigured,
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, LineError>;
