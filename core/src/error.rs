//! Error types for repository operations.

use thiserror::Error;

/// Result type alias for repository operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by the repository traits.
///
/// "No matching row" is never an error: lookups return `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The database rejected or failed the operation.
    #[error("Database error: {0}")]
    Database(String),

    /// A row was read but could not be mapped into a domain type.
    #[error("Failed to decode {entity}: {reason}")]
    Decode {
        /// Entity being decoded
        entity: &'static str,
        /// What went wrong
        reason: String,
    },

    /// No database is configured for this process.
    #[error("Database is not configured")]
    Unavailable,
}
