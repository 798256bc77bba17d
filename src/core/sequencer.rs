//! Startup sequencer - drives the linear startup state machine
//!
//! The sequencer owns the immutable configuration and the three adapters,
//! and moves through `CONFIG_LOADED -> WAITING_FOR_DB -> MIGRATING ->
//! SERVING`. A failure in any stage moves it to `FAILED` and is returned to
//! the caller, who is expected to exit with [`EntrypointError::exit_code`].

use crate::adapters::database::DatabaseProbe;
use crate::adapters::postgresql::PostgresProbe;
use crate::adapters::process::{CommandRunner, ExecLauncher, Launcher, SystemRunner};
use crate::config::EntrypointConfig;
use crate::core::launch::launch_server;
use crate::core::migrate::apply_migrations;
use crate::core::readiness::{wait_for_database, ReadinessReport};
use crate::domain::{EntrypointError, Result, Stage};
use crate::log_stage_transition;
use std::convert::Infallible;

/// Startup sequencer
pub struct StartupSequencer<P = PostgresProbe, R = SystemRunner, L = ExecLauncher> {
    config: EntrypointConfig,
    probe: P,
    runner: R,
    launcher: L,
    stage: Stage,
}

impl StartupSequencer {
    /// Create a sequencer wired to Postgres, real child processes and `exec`
    pub fn from_config(config: EntrypointConfig) -> Self {
        let probe = PostgresProbe::new(config.target.clone(), config.retry.attempt_timeout);
        Self::new(config, probe, SystemRunner, ExecLauncher)
    }
}

impl<P, R, L> StartupSequencer<P, R, L>
where
    P: DatabaseProbe,
    R: CommandRunner,
    L: Launcher,
{
    /// Create a sequencer from explicit adapters
    pub fn new(config: EntrypointConfig, probe: P, runner: R, launcher: L) -> Self {
        Self {
            config,
            probe,
            runner,
            launcher,
            stage: Stage::ConfigLoaded,
        }
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Runs the readiness wait only
    ///
    /// Leaves the sequencer in `WAITING_FOR_DB` on success and `FAILED`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`EntrypointError::DatabaseUnreachable`] when the retry
    /// budget is exhausted.
    pub async fn wait_until_ready(&mut self) -> Result<ReadinessReport> {
        self.advance(Stage::WaitingForDb)?;
        let outcome = wait_for_database(&self.probe, &self.config.retry).await;
        match outcome {
            Ok(report) => Ok(report),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Runs the full sequence: wait, migrate, hand off
    ///
    /// On success the process image is replaced and this never returns.
    /// The handoff marks the move to `SERVING`; if `exec` itself fails the
    /// launch error is returned and the stage stays `SERVING`, because
    /// nothing else will run in this process.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that failed.
    pub async fn run(&mut self) -> Result<Infallible> {
        tracing::info!(
            database = %self.probe.describe(),
            settings_module = %self.config.settings_module,
            "Starting up"
        );

        self.wait_until_ready().await?;

        self.advance(Stage::Migrating)?;
        let migrate = self.config.migrate_command();
        let migrated = apply_migrations(&self.runner, &migrate).await;
        if let Err(e) = migrated {
            return Err(self.fail(e));
        }

        self.advance(Stage::Serving)?;
        let server = self.config.server_command();
        Err(launch_server(&self.launcher, &server))
    }

    fn advance(&mut self, next: Stage) -> Result<()> {
        if !self.stage.can_transition_to(next) {
            return Err(EntrypointError::InvalidTransition {
                from: self.stage.to_string(),
                to: next.to_string(),
            });
        }
        log_stage_transition!(self.stage, next);
        self.stage = next;
        Ok(())
    }

    fn fail(&mut self, err: EntrypointError) -> EntrypointError {
        tracing::error!(stage = %self.stage, error = %err, "Startup failed");
        if !self.stage.is_terminal() {
            log_stage_transition!(self.stage, Stage::Failed);
            self.stage = Stage::Failed;
        }
        err
    }
}
