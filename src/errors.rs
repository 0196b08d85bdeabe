//! Unified error types for `jobtrack-core`.
//!
//! Absent records are never errors: lookups resolve to `None` or a `NotFound`
//! projector state. Errors here are validation rejections (user-facing
//! messages, nothing mutated) and storage or configuration failures.

use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A write was rejected at the input or write boundary. The message is
    /// suitable for direct display to the user.
    #[error("{message}")]
    Validation {
        /// User-facing description of what was rejected
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// The underlying database reported a failure. Surfaced once to the
    /// caller; the store state is unchanged and nothing is retried.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error outside the database (config file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a validation rejection with a user-facing message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
