//! Process handoff
//!
//! Handing off to the server is a one-way transition: on success the
//! current program image is gone and nothing after the call runs. That is
//! why [`Launcher::handoff`] has no success value at all.

use crate::domain::{CommandSpec, EntrypointError};

/// Transfers the process to another program
pub trait Launcher: Send + Sync {
    /// Replace the current process with `command`
    ///
    /// Returns only if the replacement could not happen; the returned error
    /// describes why.
    fn handoff(&self, command: &CommandSpec) -> EntrypointError;
}

/// [`Launcher`] that calls `execvp`
///
/// On non-unix targets there is no `exec`, so the server runs as a child
/// and this process exits with the child's status.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecLauncher;

impl Launcher for ExecLauncher {
    #[cfg(unix)]
    fn handoff(&self, command: &CommandSpec) -> EntrypointError {
        use std::os::unix::process::CommandExt;

        let err = std::process::Command::new(&command.program)
            .args(&command.args)
            .envs(command.envs.iter().map(|(k, v)| (k, v)))
            .exec();

        EntrypointError::Launch(format!("{command}: {err}"))
    }

    #[cfg(not(unix))]
    fn handoff(&self, command: &CommandSpec) -> EntrypointError {
        let status = std::process::Command::new(&command.program)
            .args(&command.args)
            .envs(command.envs.iter().map(|(k, v)| (k, v)))
            .status();

        match status {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(err) => EntrypointError::Launch(format!("{command}: {err}")),
        }
    }
}
