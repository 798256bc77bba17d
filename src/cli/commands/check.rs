//! Check-config command implementation
//!
//! Resolves the configuration exactly as `run` would and prints a summary
//! with the password redacted. Nothing is contacted.

use super::config_or_exit_code;
use crate::config::{load_config, EntrypointConfig, SERVER_BIND_ADDRESS};
use clap::Args;
use serde_json::json;
use std::path::Path;

/// Arguments for the check-config command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// Execute the check-config command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!(config_path = ?config_path, "Validating configuration");

        let config = match config_or_exit_code(load_config(config_path)) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary_json(&config))?);
        } else {
            print_summary(&config);
        }
        Ok(0)
    }
}

fn summary_json(config: &EntrypointConfig) -> serde_json::Value {
    json!({
        "database": {
            "host": config.target.host,
            "port": config.target.port,
            "name": config.target.database,
            "user": config.target.user,
            "password": "***",
            "sslmode": config.target.ssl_mode,
        },
        "retry": {
            "max_attempts": config.retry.max_attempts,
            "retry_interval_ms": config.retry.retry_interval.as_millis() as u64,
            "attempt_timeout_ms": config.retry.attempt_timeout.as_millis() as u64,
        },
        "settings_module": config.settings_module,
        "migrate_command": config.migrate_command().to_string(),
        "server_command": config.server_command().to_string(),
        "bind_address": SERVER_BIND_ADDRESS,
    })
}

fn print_summary(config: &EntrypointConfig) {
    println!("✅ Configuration is valid");
    println!();
    println!("Configuration Summary:");
    println!("  Database: {}", config.target.display_safe());
    println!("  User: {}", config.target.user);
    println!("  Password: ***");
    println!("  SSL Mode: {}", config.target.ssl_mode);
    println!(
        "  Readiness: {} attempts, {}s apart, {}s per attempt",
        config.retry.max_attempts,
        config.retry.retry_interval.as_secs(),
        config.retry.attempt_timeout.as_secs()
    );
    println!("  Settings Module: {}", config.settings_module);
    println!("  Migrate: {}", config.migrate_command());
    println!("  Server: {}", config.server_command());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_with;

    fn config() -> EntrypointConfig {
        let vars = [
            ("POSTGRES_HOST", "db"),
            ("POSTGRES_DB", "pay4"),
            ("POSTGRES_USER", "pay4app"),
            ("POSTGRES_PASSWORD", "s3cr3t-value"),
        ];
        load_config_with(None, |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_summary_json_redacts_password() {
        let value = summary_json(&config());
        let rendered = value.to_string();

        assert!(!rendered.contains("s3cr3t-value"));
        assert_eq!(value["database"]["password"], "***");
        assert_eq!(value["database"]["sslmode"], "require");
        assert_eq!(value["database"]["port"], 5432);
    }

    #[test]
    fn test_summary_json_commands() {
        let value = summary_json(&config());
        assert_eq!(
            value["server_command"],
            "gunicorn --bind 0.0.0.0:8000 pay4.wsgi:application"
        );
        assert_eq!(
            value["migrate_command"],
            "python manage.py migrate --noinput"
        );
        assert_eq!(value["retry"]["max_attempts"], 60);
        assert_eq!(value["retry"]["retry_interval_ms"], 2000);
    }
}
