//! Server handoff

use crate::adapters::process::Launcher;
use crate::domain::{CommandSpec, EntrypointError};

/// Replaces the current process with the application server
///
/// Never returns on success. The returned error means the handoff itself
/// failed; problems inside the server after a successful handoff are the
/// server's own to report.
pub fn launch_server<L>(launcher: &L, command: &CommandSpec) -> EntrypointError
where
    L: Launcher + ?Sized,
{
    tracing::info!(command = %command, "Handing off to application server");
    let err = launcher.handoff(command);
    tracing::error!(error = %err, "Server handoff failed");
    err
}
