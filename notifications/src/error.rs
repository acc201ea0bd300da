//! Error types for email delivery.

use thiserror::Error;

/// Result type alias for email operations.
pub type Result<T> = std::result::Result<T, EmailError>;

/// Email delivery failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// No API key outside development.
    #[error("Email provider API key is not configured")]
    MissingApiKey,

    /// The message has no usable recipient or sender.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The request never got a response (DNS, TLS, connection reset, ...).
    #[error("Email request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("Email provider returned {status}: {body}")]
    Provider {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// The send task panicked or was aborted.
    #[error("Email task failed: {0}")]
    TaskFailed(String),
}
