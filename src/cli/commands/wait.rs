//! Wait command implementation
//!
//! Runs only the readiness wait. Useful as an init container or as a
//! pre-start hook for processes that are not the web server.

use super::config_or_exit_code;
use crate::adapters::database::DatabaseProbe;
use crate::adapters::process::{CommandRunner, Launcher};
use crate::config::{load_config_with, process_env, EntrypointConfig};
use crate::core::StartupSequencer;
use clap::Args;
use std::path::Path;

/// Arguments for the wait command
#[derive(Args, Debug)]
pub struct WaitArgs {}

impl WaitArgs {
    /// Execute the wait command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        self.execute_with(config_path, process_env, StartupSequencer::from_config)
            .await
    }

    /// Same as [`WaitArgs::execute`] with explicit collaborators
    pub async fn execute_with<F, B, P, R, L>(
        &self,
        config_path: Option<&Path>,
        lookup: F,
        build: B,
    ) -> anyhow::Result<i32>
    where
        F: Fn(&str) -> Option<String>,
        B: FnOnce(EntrypointConfig) -> StartupSequencer<P, R, L>,
        P: DatabaseProbe,
        R: CommandRunner,
        L: Launcher,
    {
        let config = match config_or_exit_code(load_config_with(config_path, lookup)) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let mut sequencer = build(config);
        match sequencer.wait_until_ready().await {
            Ok(report) => {
                println!(
                    "Database ready after {} attempt(s) ({:.1}s)",
                    report.attempts,
                    report.elapsed.as_secs_f64()
                );
                Ok(0)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Ok(e.exit_code())
            }
        }
    }
}
