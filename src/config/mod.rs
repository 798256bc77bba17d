//! Configuration management for the entrypoint.
//!
//! # Overview
//!
//! Configuration is resolved once at process start into an immutable
//! [`EntrypointConfig`]:
//!
//! - [`ConnectionTarget`] - from the `POSTGRES_*` environment variables
//! - [`RetryPolicy`] - fixed defaults (60 attempts, 2s apart, 5s per attempt)
//! - settings module - `DJANGO_SETTINGS_MODULE`, default `pay4.settings`
//! - [`MigrateConfig`] / [`ServerConfig`] - built-in defaults, optionally
//!   overridden by a TOML file
//!
//! # Environment Variables
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `POSTGRES_HOST` | yes | |
//! | `POSTGRES_PORT` | no | `5432` |
//! | `POSTGRES_DB` | yes | |
//! | `POSTGRES_USER` | yes | |
//! | `POSTGRES_PASSWORD` | yes | |
//! | `POSTGRES_SSLMODE` | no | `require` |
//! | `DJANGO_SETTINGS_MODULE` | no | `pay4.settings` |
//!
//! # Example Configuration File
//!
//! ```toml
//! [settings]
//! module = "pay4.settings"
//!
//! [migrate]
//! program = "python"
//! args = ["manage.py", "migrate", "--noinput"]
//!
//! [server]
//! program = "gunicorn"
//! app = "pay4.wsgi:application"
//! args = ["--workers", "${GUNICORN_WORKERS}"]
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_with, process_env};
pub use schema::{
    ConnectionTarget, EntrypointConfig, FileConfig, MigrateConfig, RetryPolicy, ServerConfig,
    SettingsConfig, SslMode, SERVER_BIND_ADDRESS,
};
pub use secret::{secret_string, SecretString, SecretValue};
