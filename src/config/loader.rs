//! Configuration loader
//!
//! Resolves the [`EntrypointConfig`] from the process environment and an
//! optional TOML file. Resolution happens exactly once, before any network
//! activity, and every later stage receives the finished record.

use super::schema::{
    ConnectionTarget, EntrypointConfig, FileConfig, RetryPolicy, SslMode, DEFAULT_PORT,
    SETTINGS_MODULE_VAR,
};
use super::secret_string;
use crate::domain::errors::EntrypointError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from the process environment
///
/// This function:
/// 1. Resolves the connection target from `POSTGRES_*` variables
/// 2. Reads the optional TOML file, substituting `${VAR}` placeholders
/// 3. Applies the `DJANGO_SETTINGS_MODULE` override
/// 4. Validates the result
///
/// # Errors
///
/// Returns [`EntrypointError::MissingEnvironment`] if any required
/// variable is unset or empty, and [`EntrypointError::Configuration`] for
/// unparseable values, an unreadable file, or failed validation.
///
/// # Examples
///
/// ```no_run
/// use pay4_entrypoint::config::load_config;
///
/// let config = load_config(None).expect("Failed to load config");
/// println!("Waiting for {}", config.target.display_safe());
/// ```
pub fn load_config(path: Option<&Path>) -> Result<EntrypointConfig> {
    load_config_with(path, process_env)
}

/// Reads a variable from the process environment
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Same as [`load_config`], reading variables through `lookup`
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<EntrypointConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let target = resolve_target(&lookup)?;

    let file = match path {
        Some(path) => load_file_config(path, &lookup)?,
        None => FileConfig::default(),
    };

    let settings_module = non_empty(&lookup, SETTINGS_MODULE_VAR).unwrap_or(file.settings.module);

    let config = EntrypointConfig {
        target,
        retry: RetryPolicy::default(),
        settings_module,
        migrate: file.migrate,
        server: file.server,
    };

    config.validate().map_err(|e| {
        EntrypointError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Builds the connection target from `POSTGRES_*` variables
///
/// All missing required variables are reported together.
pub fn resolve_target<F>(lookup: &F) -> Result<ConnectionTarget>
where
    F: Fn(&str) -> Option<String>,
{
    let host = non_empty(lookup, "POSTGRES_HOST");
    let database = non_empty(lookup, "POSTGRES_DB");
    let user = non_empty(lookup, "POSTGRES_USER");
    let password = non_empty(lookup, "POSTGRES_PASSWORD");

    let missing: Vec<String> = [
        ("POSTGRES_HOST", host.is_none()),
        ("POSTGRES_DB", database.is_none()),
        ("POSTGRES_USER", user.is_none()),
        ("POSTGRES_PASSWORD", password.is_none()),
    ]
    .into_iter()
    .filter(|(_, is_missing)| *is_missing)
    .map(|(name, _)| name.to_string())
    .collect();

    let (Some(host), Some(database), Some(user), Some(password)) = (host, database, user, password)
    else {
        return Err(EntrypointError::MissingEnvironment { names: missing });
    };

    let port = match non_empty(lookup, "POSTGRES_PORT") {
        Some(raw) => parse_port(&raw)?,
        None => DEFAULT_PORT,
    };

    let ssl_mode = match non_empty(lookup, "POSTGRES_SSLMODE") {
        Some(raw) => raw
            .parse::<SslMode>()
            .map_err(|e| EntrypointError::Configuration(format!("POSTGRES_SSLMODE: {e}")))?,
        None => SslMode::default(),
    };

    Ok(ConnectionTarget {
        host,
        port,
        database,
        user,
        password: secret_string(password),
        ssl_mode,
    })
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(EntrypointError::Configuration(format!(
            "POSTGRES_PORT must be an integer between 1 and 65535, got '{raw}'"
        ))),
    }
}

/// Returns the variable's value unless it is unset or blank
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Reads and parses the TOML configuration file
fn load_file_config<F>(path: &Path, lookup: &F) -> Result<FileConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if !path.exists() {
        return Err(EntrypointError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EntrypointError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents, lookup)?;

    let file: FileConfig = toml::from_str(&contents)?;
    Ok(file)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars<F>(input: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| EntrypointError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match lookup(var_name) {
                Some(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(EntrypointError::MissingEnvironment {
            names: missing_vars,
        });
    }

    Ok(result)
}
