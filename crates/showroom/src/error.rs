//! Error types for the showroom crate.
//!
//! Repository operations report the narrower
//! [`StorageError`](crate::repository::StorageError); everything else,
//! including the command layer, works with [`Error`].

use std::path::PathBuf;
use thiserror::Error;

use crate::repository::StorageError;
use crate::storage::PoolError;

/// The main error type for showroom operations.
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

    /// A database statement outside the repository failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Schema initialisation or migration failed.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The connection pool refused to hand out a connection.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// A repository operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

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

    // === Command Errors ===
    /// No command is registered under the requested name.
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// The requested command name.
        name: String,
    },

    /// A request parameter is missing or malformed.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// What is wrong with it.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for showroom operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check if this error was caused by bad caller input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. } | Self::InvalidParameter { .. }
        )
    }
}
