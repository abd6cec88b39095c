//! Error types for the events API client.

use thiserror::Error;

/// Result type alias using our ClientError type.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by [`crate::EventsApi`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The request could not be sent or the response could not be decoded
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Status code carried by the error, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status(code) => Some(*code),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}
