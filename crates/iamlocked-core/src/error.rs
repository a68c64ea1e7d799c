//! Core error types for iamlocked-core.
//!
//! Only storage, configuration and authentication can fail. Unknown syllabus
//! or task ids are no-ops and never produce an error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for iamlocked-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication failures, surfaced to the user verbatim
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The store is locked by another process
    #[error("Store is locked")]
    Locked,

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Authentication failure carrying the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    message: String,
}

/// Vendor prefix removed from provider messages before display.
const VENDOR_PREFIX: &str = "Firebase: ";

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = match message.strip_prefix(VENDOR_PREFIX) {
            Some(rest) => rest.to_string(),
            None => message,
        };
        Self { message }
    }

    /// The display string, exactly as it should reach the user.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Focus duration must be positive
    #[error("Focus time must be a positive number of seconds")]
    NonPositiveDuration,

    /// A time string did not match HH:mm
    #[error("Invalid time '{0}': expected HH:mm")]
    InvalidTime(String),

    /// A syllabus node was left without a name
    #[error("{kind} '{id}' has an empty name")]
    EmptyName { kind: &'static str, id: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_strips_vendor_prefix() {
        let err = AuthError::new("Firebase: Error (auth/wrong-password).");
        assert_eq!(err.message(), "Error (auth/wrong-password).");
        assert_eq!(err.to_string(), "Error (auth/wrong-password).");
    }

    #[test]
    fn auth_error_keeps_plain_messages() {
        let err = AuthError::new("Please enter both email and password.");
        assert_eq!(err.message(), "Please enter both email and password.");
    }

    #[test]
    fn core_error_shows_auth_message_verbatim() {
        let err: CoreError = AuthError::new("Invalid credentials").into();
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
