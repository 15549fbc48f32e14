//! Internal error types for Hub operations.
//!
//! These errors are internal to `hfwatch-hub` and are mapped to the core
//! [`MonitorError`] at the boundary: enumeration failures become
//! `MonitorError::Enumeration`, transfer failures become
//! `MonitorError::Transfer`.

use hfwatch_core::MonitorError;
use thiserror::Error;

/// Result type alias for Hub operations.
pub type HubResult<T> = Result<T, HubError>;

/// Errors related to Hub API operations.
#[derive(Debug, Error)]
pub enum HubError {
    /// API request failed with an HTTP error status.
    #[error("Hub API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("invalid response from Hub API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The requested repository was not found.
    #[error("repository '{repo_id}' not found on the Hub")]
    RepoNotFound {
        /// The repository id that was not found
        repo_id: String,
    },

    /// Network or HTTP client error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<HubError> for MonitorError {
    fn from(err: HubError) -> Self {
        Self::enumeration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_not_found_message_names_the_repo() {
        let err = HubError::RepoNotFound {
            repo_id: "acme/missing-model".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("acme/missing-model"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn maps_to_enumeration_error_at_the_boundary() {
        let err = HubError::InvalidResponse {
            message: "tree is not an array".to_string(),
        };
        let core: MonitorError = err.into();
        assert!(matches!(core, MonitorError::Enumeration { .. }));
        assert!(core.reason().contains("tree is not an array"));
    }

    #[test]
    fn api_request_failed_carries_status_and_url() {
        let err = HubError::ApiRequestFailed {
            status: 503,
            url: "https://huggingface.co/api/models/x/y/tree/main".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("tree/main"));
    }
}
