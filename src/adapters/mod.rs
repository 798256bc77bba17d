//! External system integrations.
//!
//! This module provides adapters for the three things the sequencer touches
//! outside its own process:
//!
//! - [`database`] - the readiness probe abstraction ([`database::DatabaseProbe`])
//! - [`postgresql`] - the Postgres implementation of that probe
//! - [`process`] - running the migration tool and handing off to the server
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. The sequencer only ever sees the
//! traits, never `tokio_postgres` or `std::process` directly.
//!
//! ```rust,no_run
//! use pay4_entrypoint::adapters::database::DatabaseProbe;
//! use pay4_entrypoint::adapters::postgresql::PostgresProbe;
//! use pay4_entrypoint::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let probe = PostgresProbe::new(config.target.clone(), config.retry.attempt_timeout);
//! probe.probe().await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
pub mod process;
