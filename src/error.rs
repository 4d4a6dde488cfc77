//! Error Handling Module
//!
//! One error type covers the whole pipeline: configuration problems,
//! precondition failures, transport/HTTP failures, and responses that
//! arrive successfully but carry nothing usable. The session controller
//! stores the [`MimicError::user_message`] projection in its error slot,
//! so every failure reaches the user as a single string and never crashes
//! the workflow.

use thiserror::Error;

/// Errors produced by the analysis and generation pipeline.
#[derive(Error, Debug)]
pub enum MimicError {
    /// Missing or invalid configuration (e.g. no API key supplied).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A precondition for the requested action was not met.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The remote API answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError {
        /// HTTP status code
        code: u16,
        /// Best-effort message extracted from the error body
        message: String,
        /// The raw error body, when one was returned
        details: Option<serde_json::Value>,
    },

    /// The request never produced an HTTP response.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Response text was present but could not be parsed as JSON, or the
    /// parsed JSON did not match the expected shape.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The call succeeded but the response contained no usable text or image.
    #[error("Content error: {0}")]
    ContentError(String),

    /// Local I/O failure (reading a source asset, writing an export).
    #[error("IO error: {0}")]
    IoError(String),

    /// The operation is not supported for this input.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl MimicError {
    /// Create an API error without structured details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// The single user-visible string the session controller stores.
    ///
    /// Parse failures are presented with the same framing as other content
    /// problems; the distinction only exists for callers of the library.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { code, message, .. } => {
                format!("Request failed ({code}): {message}")
            }
            Self::JsonError(_) => {
                "The model returned content that could not be used. Check your model configuration and try again.".to_string()
            }
            Self::ConfigurationError(message)
            | Self::InvalidInput(message)
            | Self::ContentError(message)
            | Self::UnsupportedOperation(message) => message.clone(),
            Self::HttpError(message) => format!("Network request failed: {message}"),
            Self::IoError(message) => format!("File operation failed: {message}"),
        }
    }
}

impl From<reqwest::Error> for MimicError {
    fn from(error: reqwest::Error) -> Self {
        Self::HttpError(error.to_string())
    }
}

impl From<std::io::Error> for MimicError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_user_message_includes_status() {
        let error = MimicError::api_error(402, "Insufficient credits");
        assert_eq!(
            error.user_message(),
            "Request failed (402): Insufficient credits"
        );
    }

    #[test]
    fn json_error_is_presented_as_content_problem() {
        let error = MimicError::JsonError("expected value at line 1".to_string());
        let message = error.user_message();
        assert!(!message.contains("line 1"));
        assert!(message.contains("could not be used"));
    }
}
