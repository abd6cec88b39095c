//! Error types for the event announcement Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling event requests.
#[derive(Error, Debug)]
pub enum Error {
    /// Request failed validation (missing field, malformed email)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Event table call failed
    #[error("Store error: {0}")]
    Store(String),

    /// Notification topic call failed
    #[error("Notification error: {0}")]
    Notification(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Whether the error came from an external collaborator (store or topic).
    pub fn is_dependency(&self) -> bool {
        matches!(self, Error::Store(_) | Error::Notification(_))
    }

    /// The message without the variant prefix, as returned to callers.
    pub fn detail(&self) -> &str {
        match self {
            Error::Validation(msg) | Error::Store(msg) | Error::Notification(msg) => msg,
        }
    }
}
