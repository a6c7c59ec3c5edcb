//! Wingman Error Types
//!
//! Startup and configuration failures live in [`WingmanError`]; failures of the
//! external AI service are structured as [`ServiceError`] so the orchestrator
//! can abort a single turn and render a diagnostic without scraping text.

use thiserror::Error;

/// Central error type for Wingman startup and configuration
#[derive(Error, Debug)]
pub enum WingmanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No OpenAI API key configured (set openai.api_key or OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Input backend error: {0}")]
    Input(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Wingman operations
pub type WingmanResult<T> = Result<T, WingmanError>;

/// Failure of a call to the language-model, transcription or speech service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The API key cannot be used at all (rejected before anything was sent)
    #[error("invalid API credentials: {0}")]
    Credential(String),

    /// The service answered with a non-success status code
    #[error("service returned {status} ({kind}): {message}")]
    Status {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// HTTP status code, if the service produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}
