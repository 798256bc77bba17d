//! CLI command implementations
//!
//! Every command resolves the configuration first, so a missing required
//! variable fails before any connection attempt.

pub mod check;
pub mod run;
pub mod wait;

use crate::config::EntrypointConfig;
use crate::domain::Result;

/// Passes resolved configuration through, or reports the error and
/// returns its exit code
pub(crate) fn config_or_exit_code(
    resolved: Result<EntrypointConfig>,
) -> std::result::Result<EntrypointConfig, i32> {
    resolved.map_err(|e| {
        tracing::error!(error = %e, "Failed to resolve configuration");
        eprintln!("Error: {e}");
        e.exit_code()
    })
}
