//! Error types for the notifications module

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed lower-level error kept as the cause of a [`BackendError`]
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A backend failed to deliver an email
#[derive(Debug, Error)]
#[error("Notification backend failed: {message}")]
pub struct BackendError {
    message: String,

    #[source]
    cause: Option<BoxError>,
}

impl BackendError {
    /// Creates a backend error without an underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a backend error wrapping the error that caused it.
    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// The description of the failure, without the backend prefix
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped lower-level error, if any
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

/// Errors that can occur when reading a backend's settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// One or more required variables are missing or empty
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),

    /// A variable does not hold a valid URL
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl {
        /// The variable holding the URL
        name: &'static str,

        /// Why the URL was rejected
        reason: String,
    },

    /// A variable could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Errors surfaced by the notification service
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The client could not be configured
    #[error(transparent)]
    Configuration(#[from] SettingsError),

    /// The backend failed to send the notification
    #[error(transparent)]
    Backend(#[from] BackendError),
}
