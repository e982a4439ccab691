//! Shared primitives for all Rust crates in Coachdesk.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::AdminIdentity;

/// Result type used across Coachdesk crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant. Raised before any backend call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Credentials were rejected or the session is missing.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The backing store reported a failure for a row operation.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Staging a file for one form field failed.
    #[error("upload failed for '{field}': {message}")]
    Upload {
        /// Form field whose upload failed.
        field: String,
        /// Backend-reported reason.
        message: String,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the message without the category prefix, for inline display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Unauthorized(message)
            | Self::Persistence(message)
            | Self::Internal(message) => message.clone(),
            Self::Upload { field, message } => format!("{field}: {message}"),
        }
    }
}
