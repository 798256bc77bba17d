// Pay4 Entrypoint - container startup sequencer
// Copyright (c) 2025 Pay4 Contributors
// Licensed under the MIT License

use clap::Parser;
use pay4_entrypoint::cli::{Cli, Commands};
use pay4_entrypoint::domain::errors::EXIT_FATAL;
use pay4_entrypoint::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    if let Err(e) = init_logging(log_level, cli.log_format) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(e.exit_code());
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Pay4 entrypoint");

    // Signals keep their default disposition: SIGTERM/SIGINT end the
    // process at whatever stage it is in.
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Run(args) => args.execute(config_path).await,
        Commands::Wait(args) => args.execute(config_path).await,
        Commands::CheckConfig(args) => args.execute(config_path).await,
    }
}
