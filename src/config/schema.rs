//! Configuration schema types
//!
//! The resolved configuration is an immutable [`EntrypointConfig`] built once
//! at process start. The database [`ConnectionTarget`] always comes from the
//! `POSTGRES_*` environment variables; the collaborator commands come from
//! built-in defaults, optionally overridden by a TOML file ([`FileConfig`]).

use crate::config::SecretString;
use crate::domain::CommandSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Address the application server is always bound to
pub const SERVER_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Environment variable that selects the application settings module
pub const SETTINGS_MODULE_VAR: &str = "DJANGO_SETTINGS_MODULE";

/// Default Postgres port
pub const DEFAULT_PORT: u16 = 5432;

/// Long form of the server's bind option
const BIND_LONG_FLAG: &str = "--bind";

/// Short form of the server's bind option
const BIND_SHORT_FLAG: &str = "-b";

/// Postgres SSL policy, using the libpq vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    /// Never use TLS
    Disable,
    /// Plaintext first; treated like `prefer` by the driver
    Allow,
    /// Try TLS, fall back to plaintext
    Prefer,
    /// TLS mandatory, certificate not verified
    #[default]
    Require,
    /// TLS mandatory, certificate chain verified
    VerifyCa,
    /// TLS mandatory, chain and hostname verified
    VerifyFull,
}

impl SslMode {
    pub const VALID: [&'static str; 6] = [
        "disable",
        "allow",
        "prefer",
        "require",
        "verify-ca",
        "verify-full",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Allow => "allow",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for SslMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "allow" => Ok(SslMode::Allow),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(format!(
                "ssl mode must be one of: {}, got '{}'",
                SslMode::VALID.join(", "),
                other
            )),
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the database lives and how to authenticate
///
/// Built once from `POSTGRES_*` variables. The password is redacted in
/// `Debug` output.
#[derive(Debug, Clone)]
pub struct ConnectionTarget {
    /// Database host
    pub host: String,

    /// Database port
    pub port: u16,

    /// Database name
    pub database: String,

    /// Database user
    pub user: String,

    /// Database password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// SSL policy
    pub ssl_mode: SslMode,
}

impl ConnectionTarget {
    /// `host:port/database`, safe to log
    pub fn display_safe(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

/// Bounded, fixed-interval retry policy for the readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of probe attempts before giving up
    pub max_attempts: u32,

    /// Sleep between two consecutive attempts
    pub retry_interval: Duration,

    /// Upper bound for a single attempt (connect + query)
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            retry_interval: Duration::from_secs(2),
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

/// Optional file-based configuration
///
/// Every section falls back to its defaults, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub settings: SettingsConfig,

    #[serde(default)]
    pub migrate: MigrateConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Application settings selection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfig {
    /// Settings module passed to both children
    #[serde(default = "default_settings_module")]
    pub module: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            module: default_settings_module(),
        }
    }
}

/// Migration tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrateConfig {
    #[serde(default = "default_migrate_program")]
    pub program: String,

    #[serde(default = "default_migrate_args")]
    pub args: Vec<String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            program: default_migrate_program(),
            args: default_migrate_args(),
        }
    }
}

impl MigrateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("migrate.program cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Application server invocation
///
/// The bind address is not configurable; `--bind 0.0.0.0:8000` is always
/// added by [`EntrypointConfig::server_command`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_server_program")]
    pub program: String,

    /// Application entry-point reference, e.g. `pay4.wsgi:application`
    #[serde(default = "default_server_app")]
    pub app: String,

    /// Extra server arguments, placed before the bind flag
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            program: default_server_program(),
            app: default_server_app(),
            args: Vec::new(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("server.program cannot be empty".to_string());
        }
        if self.app.trim().is_empty() {
            return Err("server.app cannot be empty".to_string());
        }
        if let Some(flag) = self.args.iter().find(|arg| is_bind_flag(arg)) {
            return Err(format!(
                "server.args may not contain '{flag}'; \
                 the bind address is fixed to {SERVER_BIND_ADDRESS}"
            ));
        }
        Ok(())
    }
}

/// Whether `arg` would set a bind address on the server
///
/// Covers `-b`, attached short values such as `-b127.0.0.1:9000`, and any
/// abbreviation of `--bind`, with or without `=value`.
fn is_bind_flag(arg: &str) -> bool {
    if arg.starts_with(BIND_SHORT_FLAG) {
        return true;
    }
    let name = arg.split_once('=').map_or(arg, |(name, _)| name);
    name.len() > "--".len() && BIND_LONG_FLAG.starts_with(name)
}

/// Fully resolved entrypoint configuration
#[derive(Debug, Clone)]
pub struct EntrypointConfig {
    pub target: ConnectionTarget,
    pub retry: RetryPolicy,
    pub settings_module: String,
    pub migrate: MigrateConfig,
    pub server: ServerConfig,
}

impl EntrypointConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.target.port == 0 {
            return Err("POSTGRES_PORT must be between 1 and 65535".to_string());
        }
        if self.retry.max_attempts == 0 {
            return Err("retry.max_attempts must be at least 1".to_string());
        }
        if self.settings_module.trim().is_empty() {
            return Err("settings.module cannot be empty".to_string());
        }
        self.migrate.validate()?;
        self.server.validate()?;
        Ok(())
    }

    /// Migration tool command with the settings module set
    pub fn migrate_command(&self) -> CommandSpec {
        CommandSpec::new(&self.migrate.program)
            .args(self.migrate.args.iter().cloned())
            .env(SETTINGS_MODULE_VAR, &self.settings_module)
    }

    /// Server command: `<program> <args..> --bind 0.0.0.0:8000 <app>`
    pub fn server_command(&self) -> CommandSpec {
        CommandSpec::new(&self.server.program)
            .args(self.server.args.iter().cloned())
            .args(["--bind", SERVER_BIND_ADDRESS])
            .arg(&self.server.app)
            .env(SETTINGS_MODULE_VAR, &self.settings_module)
    }
}

// Default value functions

fn default_settings_module() -> String {
    "pay4.settings".to_string()
}

fn default_migrate_program() -> String {
    "python".to_string()
}

fn default_migrate_args() -> Vec<String> {
    vec![
        "manage.py".to_string(),
        "migrate".to_string(),
        "--noinput".to_string(),
    ]
}

fn default_server_program() -> String {
    "gunicorn".to_string()
}

fn default_server_app() -> String {
    "pay4.wsgi:application".to_string()
}
