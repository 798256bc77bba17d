//! Running external commands to completion

use crate::domain::{CommandSpec, EntrypointError, Result};
use async_trait::async_trait;
use std::fmt;
use std::process::{ExitStatus, Stdio};

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exited normally with a status code
    Exited(i32),
    /// Killed by a signal (unix only)
    Signaled(i32),
    /// The platform did not report either
    Unknown,
}

impl ExitOutcome {
    pub fn success(self) -> bool {
        self == ExitOutcome::Exited(0)
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitOutcome::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitOutcome::Signaled(signal);
            }
        }

        ExitOutcome::Unknown
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Exited(code) => write!(f, "exit status {code}"),
            ExitOutcome::Signaled(signal) => write!(f, "signal {signal}"),
            ExitOutcome::Unknown => f.write_str("unknown status"),
        }
    }
}

/// Runs a command and waits for it to finish
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` with inherited stdio and report how it ended
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started or
    /// waited on. A non-zero exit is reported through [`ExitOutcome`].
    async fn run(&self, command: &CommandSpec) -> Result<ExitOutcome>;
}

/// [`CommandRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ExitOutcome> {
        tracing::debug!(command = %command, "Spawning child process");

        let status = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .envs(command.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                EntrypointError::Io(format!("failed to spawn '{}': {e}", command.program))
            })?;

        Ok(status.into())
    }
}
