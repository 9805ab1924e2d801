//! Error types for decisionmaker.
//!
//! This module defines the error types used throughout the decisionmaker crate.
//! [`ValidationError`] is the only kind a user is expected to see during normal
//! use; everything else on [`Error`] comes from the storage, configuration or
//! serialization layers.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown whenever a submission is missing one of its fields.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";

/// A draft field that must be filled in before a decision can be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// The question being decided.
    Question,
    /// The first option.
    Option1,
    /// The second option.
    Option2,
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Question => write!(f, "question"),
            Self::Option1 => write!(f, "option1"),
            Self::Option2 => write!(f, "option2"),
        }
    }
}

/// A submission was rejected before any decision was made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One of the three input fields is empty.
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingField {
        /// The first empty field, in input order.
        field: DraftField,
    },
}

impl ValidationError {
    /// The field that caused the rejection.
    #[must_use]
    pub fn field(&self) -> DraftField {
        match self {
            Self::MissingField { field } => *field,
        }
    }
}

/// The main error type for decisionmaker operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The value stored under a key could not be read back as a history.
    #[error("stored value under '{key}' is corrupt: {message}")]
    CorruptState {
        /// The store key holding the bad value.
        key: String,
        /// Description of what was wrong with it.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Input Errors ===
    /// A submission was missing a field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for decisionmaker operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a corrupt state error for the given key.
    #[must_use]
    pub fn corrupt_state(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptState {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Check if this error means stored data could not be trusted.
    #[must_use]
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, Self::CorruptState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::MissingField {
            field: DraftField::Question,
        };
        assert_eq!(err.to_string(), "Please fill in all fields");
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
        assert_eq!(err.field(), DraftField::Question);
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: Error = ValidationError::MissingField {
            field: DraftField::Option2,
        }
        .into();
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
        assert!(matches!(err, Error::Validation(_)));
        assert!(!err.is_corrupt_state());
    }

    #[test]
    fn test_draft_field_display() {
        assert_eq!(DraftField::Question.to_string(), "question");
        assert_eq!(DraftField::Option1.to_string(), "option1");
        assert_eq!(DraftField::Option2.to_string(), "option2");
    }

    #[test]
    fn test_corrupt_state_error() {
        let err = Error::corrupt_state("decisions", "expected an array");
        assert!(err.is_corrupt_state());
        let msg = err.to_string();
        assert!(msg.contains("decisions"));
        assert!(msg.contains("expected an array"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "empty timestamp format".to_string(),
        };
        assert!(err.to_string().contains("empty timestamp format"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
