//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the entrypoint using clap.

pub mod commands;

use crate::logging::LogFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Container entrypoint: wait for Postgres, migrate, hand off to the server
#[derive(Parser, Debug)]
#[command(name = "pay4-entrypoint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "ENTRYPOINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ENTRYPOINT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format (text, json)
    #[arg(long, env = "ENTRYPOINT_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wait for the database, apply migrations, then exec the server
    Run(commands::run::RunArgs),

    /// Wait for the database and exit
    Wait(commands::wait::WaitArgs),

    /// Resolve and validate configuration, then print a summary
    CheckConfig(commands::check::CheckArgs),
}
