//! Child process and process handoff integration
//!
//! - [`runner`] - run a command to completion (the migration tool)
//! - [`exec`] - replace the current process image (the application server)

pub mod exec;
pub mod runner;

pub use exec::{ExecLauncher, Launcher};
pub use runner::{CommandRunner, ExitOutcome, SystemRunner};
