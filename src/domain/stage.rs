//! Startup stages
//!
//! The sequencer walks a linear, terminal state machine:
//!
//! ```text
//! CONFIG_LOADED -> WAITING_FOR_DB -> MIGRATING -> SERVING
//!        \               \               \
//!         +---------------+---------------+--> FAILED
//! ```
//!
//! There is no path back to an earlier stage. Recovery means restarting the
//! container, which re-enters `CONFIG_LOADED` from scratch.

use std::fmt;

/// A stage of the startup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Configuration has been resolved from the environment
    ConfigLoaded,
    /// Polling the database until it answers
    WaitingForDb,
    /// Running the migration tool
    Migrating,
    /// Process handed over to the application server
    Serving,
    /// A stage failed; the process is about to exit
    Failed,
}

impl Stage {
    /// Returns true if moving from `self` to `next` is allowed
    pub fn can_transition_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::ConfigLoaded, Stage::WaitingForDb)
                | (Stage::WaitingForDb, Stage::Migrating)
                | (Stage::Migrating, Stage::Serving)
                | (Stage::ConfigLoaded, Stage::Failed)
                | (Stage::WaitingForDb, Stage::Failed)
                | (Stage::Migrating, Stage::Failed)
        )
    }

    /// Returns true for `SERVING` and `FAILED`
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Serving | Stage::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::ConfigLoaded => "CONFIG_LOADED",
            Stage::WaitingForDb => "WAITING_FOR_DB",
            Stage::Migrating => "MIGRATING",
            Stage::Serving => "SERVING",
            Stage::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
