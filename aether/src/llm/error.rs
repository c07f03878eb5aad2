//! Model gateway error types

use thiserror::Error;

/// Errors that can occur while talking to the model provider
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not found. Set the {primary} (or {fallback}) environment variable.")]
    MissingCredential { primary: String, fallback: String },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this is a configuration problem rather than a provider failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, LlmError::MissingCredential { .. })
    }

    /// Check if the response arrived but could not be understood
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, LlmError::Json(_) | LlmError::InvalidResponse(_))
    }

    /// HTTP status returned by the provider, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::ApiError { status, .. } => Some(*status),
            LlmError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
