//! Run command implementation
//!
//! The container's main entrypoint: wait for the database, apply
//! migrations, then replace this process with the application server.

use super::config_or_exit_code;
use crate::adapters::database::DatabaseProbe;
use crate::adapters::process::{CommandRunner, Launcher};
use crate::config::{load_config_with, process_env, EntrypointConfig};
use crate::core::StartupSequencer;
use clap::Args;
use std::path::Path;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {}

impl RunArgs {
    /// Execute the run command
    ///
    /// Only returns when startup failed; the returned code is non-zero.
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        self.execute_with(config_path, process_env, StartupSequencer::from_config)
            .await
    }

    /// Same as [`RunArgs::execute`] with explicit collaborators
    ///
    /// `lookup` supplies environment variables and `build` wires the
    /// sequencer once configuration has resolved. `build` is not called
    /// when configuration fails.
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
        let err = match sequencer.run().await {
            Ok(never) => match never {},
            Err(e) => e,
        };

        eprintln!("Error: {err}");
        Ok(err.exit_code())
    }
}
