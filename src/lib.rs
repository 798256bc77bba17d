// Pay4 Entrypoint - container startup sequencer
// Copyright (c) 2025 Pay4 Contributors
// Licensed under the MIT License

//! # Pay4 Entrypoint
//!
//! Brings a stateless application container from "started" to "serving":
//!
//! 1. **Resolve** configuration from `POSTGRES_*` environment variables
//! 2. **Wait** until Postgres accepts a connection and answers `SELECT 1`
//!    (60 attempts, 2 seconds apart, 5 seconds per attempt)
//! 3. **Migrate** by running the external migration tool once
//! 4. **Hand off** by replacing this process with the application server,
//!    bound to `0.0.0.0:8000`
//!
//! Any failure ends the process with a non-zero, stage-specific exit code.
//! The orchestrator restarts the container; there is no in-process recovery.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Readiness wait, migration, handoff and the sequencer
//! - [`adapters`] - Postgres probe, child processes, `exec`
//! - [`domain`] - Errors, stages and command descriptions
//! - [`config`] - Configuration resolution
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pay4_entrypoint::config::load_config;
//! use pay4_entrypoint::core::StartupSequencer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = load_config(None).expect("configuration");
//!     let mut sequencer = StartupSequencer::from_config(config);
//!
//!     if let Err(e) = sequencer.run().await {
//!         eprintln!("Error: {e}");
//!         std::process::exit(e.exit_code());
//!     }
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose error type
//! [`domain::EntrypointError`] knows its exit code:
//!
//! | Code | Meaning |
//! |---|---|
//! | 2 | configuration or missing environment |
//! | 3 | migration failure |
//! | 4 | database unreachable |
//! | 5 | launch failure |

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
