//! Data sync error types

use thiserror::Error;

/// Errors that can occur when talking to the agenda backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Backend refused the connection
    #[error("Backend unavailable")]
    Unavailable,

    /// Backend answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Classify a reqwest failure the same way for every request
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }
}

/// Result type alias for data sync operations
pub type ClientResult<T> = Result<T, ClientError>;
