use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Invalid lookback_days: \"{0}\" - must be a positive integer")]
    InvalidLookbackDays(String),

    #[error("Invalid repository: \"{0}\" - expected owner/name")]
    InvalidRepository(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AlertError>;
