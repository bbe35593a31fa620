//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Duplicate entry (username already taken).
    #[error("{0}")]
    Conflict(String),

    /// Login failed. Deliberately identical for unknown username and
    /// wrong password so callers cannot probe which usernames exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token missing, malformed, or failing signature verification.
    #[error("{0}")]
    Unauthorized(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Conflict(_) | Self::InvalidCredentials => 400,
            Self::Unauthorized(_) => 401,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the single-sentence message exposed to API callers.
    ///
    /// Server-side failures collapse to a generic message; their detail
    /// stays in logs only.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Something went wrong".to_string(),
            other => other.to_string(),
        }
    }
}
