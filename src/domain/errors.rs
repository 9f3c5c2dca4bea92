//! Domain error types
//!
//! This module defines the error hierarchy for Informe. Errors are domain-specific
//! and don't expose third-party types; HTTP and filesystem failures are converted
//! into strings at the boundary where they happen.

use thiserror::Error;

/// Main Informe error type
///
/// Reconciliation and snapshot application never produce errors; everything here
/// comes from configuration, file I/O, document parsing or the assistant backend.
#[derive(Debug, Error)]
pub enum InformeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid user-supplied values (unknown section index, bad field id...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Imported document is not a JSON object this editor can read
    #[error("Invalid document: {0}")]
    Format(String),

    /// Assistant backend errors
    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Generative assistant errors
///
/// `ModelUnavailable` is the only recoverable variant: it carries the models the
/// backend reports so a fallback can be suggested to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssistantError {
    /// No API key configured
    #[error("API Key no configurada.")]
    MissingApiKey,

    /// The requested model does not exist for this key/project
    #[error("Model unavailable: {message}")]
    ModelUnavailable {
        message: String,
        available_models: Vec<String>,
    },

    /// Non-2xx response, message taken from the backend when present
    #[error("{0}")]
    RequestFailed(String),

    /// Could not reach the backend
    #[error("Failed to connect to assistant backend: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body could not be understood
    #[error("Invalid response from assistant backend: {0}")]
    InvalidResponse(String),
}

impl AssistantError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AssistantError::RequestFailed(_)
                | AssistantError::ConnectionFailed(_)
                | AssistantError::Timeout(_)
                | AssistantError::InvalidResponse(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for InformeError {
    fn from(err: std::io::Error) -> Self {
        InformeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for InformeError {
    fn from(err: serde_json::Error) -> Self {
        InformeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for InformeError {
    fn from(err: toml::de::Error) -> Self {
        InformeError::Configuration(format!("TOML parse error: {err}"))
    }
}
