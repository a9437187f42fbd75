//! Error types for todolist_client

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Errors raised while talking to the API service
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClientError {
    /// Transport failure or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("unexpected response status {status}")]
    Status {
        /// Numeric HTTP status code
        status: u16,
    },

    /// The configured base URL is not an absolute http(s) URL
    #[error("invalid API base URL `{0}`")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Whether the service reported the todo as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404 })
    }
}
