//! Monitor error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `std::io::Error`; causes are captured as strings.
//!
//! Only enumeration and transfer failures exist here. Polling observation
//! failures and timing degeneracies are absorbed where they occur and never
//! reach the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for monitor runs.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum MonitorError {
    /// The file list or sizes could not be obtained.
    ///
    /// Fatal, and surfaced before any `Start` event is emitted.
    #[error("enumeration failed: {message}")]
    Enumeration {
        /// Detailed error message.
        message: String,
    },

    /// A single file's transfer failed.
    ///
    /// Fatal to the run; mirrored as the terminal `Error` event. No partial
    /// cleanup, no retry.
    #[error("transfer of '{path}' failed: {message}")]
    Transfer {
        /// Path of the file whose transfer failed.
        path: String,
        /// Reason reported by the transfer collaborator.
        message: String,
    },
}

impl MonitorError {
    /// Create an enumeration error.
    pub fn enumeration(message: impl Into<String>) -> Self {
        Self::Enumeration {
            message: message.into(),
        }
    }

    /// Create a transfer error for a specific file.
    pub fn transfer(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transfer {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The reason string carried by the terminal `Error` event.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Enumeration { message } | Self::Transfer { message, .. } => message,
        }
    }
}

/// Convenience result type for monitor operations.
pub type MonitorResult<T> = Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_error_names_the_file() {
        let err = MonitorError::transfer("model.safetensors", "connection reset");
        let msg = err.to_string();
        assert!(msg.contains("model.safetensors"));
        assert!(msg.contains("connection reset"));
        assert_eq!(err.reason(), "connection reset");
    }

    #[test]
    fn enumeration_error_message() {
        let err = MonitorError::enumeration("repo not found");
        assert!(err.to_string().contains("repo not found"));
        assert_eq!(err.reason(), "repo not found");
    }

    #[test]
    fn errors_serialize_round_trip() {
        let err = MonitorError::transfer("a.bin", "timeout");
        let json = serde_json::to_string(&err).unwrap();
        let parsed: MonitorError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, err);
    }
}
