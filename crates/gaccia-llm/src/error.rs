//! Error types for gaccia-llm

use thiserror::Error;

/// Errors that can occur while talking to a text-generation service
#[derive(Error, Debug)]
pub enum LlmError {
    /// Required environment variable or setting is absent
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Endpoint answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Endpoint answered successfully but without any content
    #[error("service returned an empty response")]
    EmptyResponse,

    /// Response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LlmError::Decode(err.to_string())
        } else {
            LlmError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::Decode(err.to_string())
    }
}
