//! Error types for the Cortex client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Cortex client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// The taxonomy mirrors how failures are handled:
/// - `Validation` and `State` are rejected locally, before any network call.
/// - `Api` carries the status and server-supplied message of a non-2xx response.
/// - `Network` means the request produced no response at all.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CortexError {
    /// Local input validation failure (never reaches the network)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport failure with no response
    #[error("Network error: {0}")]
    Network(String),

    /// Operation rejected by local state (e.g. starting a second focus session)
    #[error("State error: {0}")]
    State(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential store error
    #[error("Credential error: {0}")]
    Credential(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CortexError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Api error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a State error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Credential error
    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Api error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a State error
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State(_))
    }

    /// Returns the message a user should see for this error.
    ///
    /// Api errors surface the server-supplied message; everything else
    /// falls back to the Display impl.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Validation(message) | Self::State(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CortexError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CortexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CortexError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CortexError>`.
pub type Result<T> = std::result::Result<T, CortexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_user_message() {
        let err = CortexError::api(401, "invalid credentials");
        assert!(err.is_api());
        assert_eq!(err.user_message(), "invalid credentials");
    }

    #[test]
    fn test_validation_error_is_local() {
        let err = CortexError::validation("passwords do not match");
        assert!(err.is_validation());
        assert!(!err.is_api());
        assert_eq!(err.user_message(), "passwords do not match");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CortexError = io.into();
        assert!(matches!(err, CortexError::Io { .. }));
    }
}
