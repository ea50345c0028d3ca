use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TldwError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid API origin {origin}: {source}")]
    InvalidOrigin {
        origin: String,
        source: url::ParseError,
    },

    #[error("Unsupported environment {0:?}, expected \"local\" or \"production\"")]
    UnknownEnvironment(String),

    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Malformed summary response: {reason}")]
    MalformedResponse { reason: String },
}

pub type Result<T> = std::result::Result<T, TldwError>;
