//! Core error types for noteprogress-core.
//!
//! Errors are grouped by recovery policy: corrupt persisted or edited data
//! is replaced by defaults, persistence failures keep the in-memory state and
//! are retried on the next save. Hosts that cannot retry surface them through
//! [`CoreError::Persistence`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for noteprogress-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persisted or user-edited progress data failed validation
    #[error("Corrupt state: {0}")]
    CorruptState(#[from] CorruptStateError),

    /// Reading or writing the progress record failed
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Validation failures for the progress record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorruptStateError {
    /// A persisted field had the wrong type or range
    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// A manual settings edit could not be parsed as a non-negative integer
    #[error("'{value}' is not a valid value for '{field}' (expected a non-negative integer)")]
    InvalidSetting { field: String, value: String },

    /// The settings panel referenced a field that is not editable
    #[error("unknown setting: {0}")]
    UnknownField(String),

    /// The persisted blob was not a key-value record
    #[error("persisted progress data is not an object")]
    NotAnObject,
}

/// Failures of the settings persistence collaborator.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read the progress record
    #[error("Failed to read progress data from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the progress record
    #[error("Failed to write progress data to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record could not be encoded
    #[error("Failed to encode progress data: {0}")]
    Encode(#[from] serde_json::Error),

    /// The stored record is not valid JSON
    #[error("Failed to decode progress data from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The store is not reachable (e.g. no data directory)
    #[error("Progress store unavailable: {0}")]
    Unavailable(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_state_wraps_into_core_error() {
        let err: CoreError = CorruptStateError::InvalidSetting {
            field: "streakCount".into(),
            value: "abc".into(),
        }
        .into();
        assert!(matches!(err, CoreError::CorruptState(_)));
        assert!(err.to_string().contains("'abc' is not a valid value"));
    }

    #[test]
    fn write_failure_names_path() {
        let err = PersistenceError::WriteFailed {
            path: PathBuf::from("/tmp/data.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/data.json"));
    }
}
