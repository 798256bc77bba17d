//! Core startup logic.
//!
//! # Modules
//!
//! - [`readiness`] - bounded, fixed-interval wait for the database
//! - [`migrate`] - one-shot run of the external migration tool
//! - [`launch`] - one-way handoff to the application server
//! - [`sequencer`] - the state machine tying the three together
//!
//! # Startup Workflow
//!
//! 1. **Config loaded**: the immutable [`crate::config::EntrypointConfig`] exists
//! 2. **Wait for DB**: probe until `SELECT 1` answers, or give up
//! 3. **Migrate**: run the migration tool, abort on non-zero exit
//! 4. **Serve**: `exec` the server bound to `0.0.0.0:8000`
//!
//! # Example
//!
//! ```rust,no_run
//! use pay4_entrypoint::config::load_config;
//! use pay4_entrypoint::core::sequencer::StartupSequencer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let mut sequencer = StartupSequencer::from_config(config);
//!
//! // Only returns if something went wrong
//! let err = match sequencer.run().await {
//!     Ok(never) => match never {},
//!     Err(e) => e,
//! };
//! std::process::exit(err.exit_code());
//! # }
//! ```

pub mod launch;
pub mod migrate;
pub mod readiness;
pub mod sequencer;

pub use launch::launch_server;
pub use migrate::apply_migrations;
pub use readiness::{wait_for_database, ReadinessReport};
pub use sequencer::StartupSequencer;
