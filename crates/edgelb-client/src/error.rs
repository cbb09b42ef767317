//! Edge-LB client errors

use thiserror::Error;

/// Errors that can occur when interacting with the Edge-LB API
#[derive(Debug, Error)]
pub enum EdgeLbError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Edge-LB API returned an unexpected status
    #[error("Edge-LB API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or a description of the failed call
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid or expired token)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Pool not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., empty pool name)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl EdgeLbError {
    /// Whether the error means the requested pool does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, EdgeLbError::NotFound(_))
    }

    /// Whether retrying the same request later may succeed
    ///
    /// Connection failures, timeouts, throttling and server-side errors are
    /// transient. Authentication, malformed requests and undecodable
    /// responses are not.
    pub fn is_transient(&self) -> bool {
        match self {
            EdgeLbError::Http(e) => !(e.is_builder() || e.is_decode()),
            EdgeLbError::Api { status, .. } => *status == 429 || *status >= 500,
            EdgeLbError::Timeout(_) => true,
            EdgeLbError::Serialization(_)
            | EdgeLbError::Authentication(_)
            | EdgeLbError::NotFound(_)
            | EdgeLbError::InvalidRequest(_) => false,
        }
    }
}
