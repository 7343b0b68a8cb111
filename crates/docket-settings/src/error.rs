//! Error types for the settings crate.
//!
//! This module provides structured error types for configuration files,
//! template persistence and backup import/export.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading, validating or saving the config.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The file extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The configuration directory could not be found.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),
}

/// Errors related to the persisted template store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The stored file exists but does not hold a template store.
    #[error("Corrupted template store: {0}")]
    Corrupted(String),

    /// No platform data directory is available.
    #[error("Storage directory unavailable")]
    NoStorageDirectory,

    /// I/O error during persistence.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error during persistence.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors raised while exporting or importing a backup.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The payload has no `templates` array.
    #[error("Backup format error: templates must be an array")]
    MissingTemplates,

    /// The payload is not valid JSON or a template is malformed.
    #[error("Backup format error: {0}")]
    Format(#[from] serde_json::Error),

    /// I/O error reading or writing the backup file.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Result type alias for backup operations.
pub type BackupResult<T> = Result<T, BackupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::InvalidSetting {
            key: "poll_interval_ms".to_string(),
            reason: "must be > 0".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid setting 'poll_interval_ms': must be > 0");

        let err = SettingsError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");
    }

    #[test]
    fn test_backup_error_display() {
        assert_eq!(
            BackupError::MissingTemplates.to_string(),
            "Backup format error: templates must be an array"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PersistenceError = io_err.into();
        assert!(matches!(err, PersistenceError::IoError(_)));
    }
}
