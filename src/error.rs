//! Error types for Referat.

use thiserror::Error;

/// Library-level error type for Referat operations.
#[derive(Error, Debug)]
pub enum ReferatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Minutes extraction failed: {0}")]
    Extraction(String),

    #[error("Edited minutes could not be parsed: {0}")]
    MalformedRecord(String),

    #[error("Document rendering failed: {0}")]
    Render(String),

    #[error("Mail delivery failed: {0}")]
    Mail(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Referat operations.
pub type Result<T> = std::result::Result<T, ReferatError>;
