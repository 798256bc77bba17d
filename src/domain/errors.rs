//! Domain error types
//!
//! This module defines the error hierarchy for the entrypoint. Third-party
//! error types (driver, TLS, process) are converted to strings at the
//! adapter boundary and never leak through the public API.

use thiserror::Error;

/// Exit code for configuration and environment errors
pub const EXIT_CONFIGURATION: i32 = 2;

/// Exit code for a failed migration run
pub const EXIT_MIGRATION: i32 = 3;

/// Exit code when the database never became reachable
pub const EXIT_DATABASE_UNREACHABLE: i32 = 4;

/// Exit code for launch failures and any other fatal error
pub const EXIT_FATAL: i32 = 5;

/// Main entrypoint error type
#[derive(Debug, Error)]
pub enum EntrypointError {
    /// Invalid configuration value or unreadable configuration file
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One or more required environment variables are unset or empty
    #[error("Missing required environment variables: {}", .names.join(", "))]
    MissingEnvironment { names: Vec<String> },

    /// A single readiness probe failed
    ///
    /// Recovered locally by the readiness wait; only surfaces as the
    /// `last_error` of [`EntrypointError::DatabaseUnreachable`].
    #[error("Database error: {0}")]
    Database(String),

    /// Every attempt within the retry budget failed
    #[error("Database unreachable after {attempts} attempts: {last_error}")]
    DatabaseUnreachable { attempts: u32, last_error: String },

    /// The migration tool exited unsuccessfully
    #[error("Migration failed: {command} exited with {status}")]
    MigrationFailure { command: String, status: String },

    /// The migration tool could not be started at all
    #[error("Migration tool could not be started ({command}): {reason}")]
    MigrationNotStarted { command: String, reason: String },

    /// The server process could not replace the current process
    #[error("Failed to launch server: {0}")]
    Launch(String),

    /// Attempted a stage transition the state machine does not allow
    #[error("Invalid stage transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl EntrypointError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            EntrypointError::Configuration(_) | EntrypointError::MissingEnvironment { .. } => {
                EXIT_CONFIGURATION
            }
            EntrypointError::MigrationFailure { .. }
            | EntrypointError::MigrationNotStarted { .. } => EXIT_MIGRATION,
            EntrypointError::Database(_) | EntrypointError::DatabaseUnreachable { .. } => {
                EXIT_DATABASE_UNREACHABLE
            }
            EntrypointError::Launch(_)
            | EntrypointError::InvalidTransition { .. }
            | EntrypointError::Io(_) => EXIT_FATAL,
        }
    }
}

impl From<std::io::Error> for EntrypointError {
    fn from(err: std::io::Error) -> Self {
        EntrypointError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for EntrypointError {
    fn from(err: toml::de::Error) -> Self {
        EntrypointError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<tokio_postgres::Error> for EntrypointError {
    fn from(err: tokio_postgres::Error) -> Self {
        EntrypointError::Database(err.to_string())
    }
}
