//! PostgreSQL integration
//!
//! This module provides the Postgres readiness probe and the TLS setup that
//! maps libpq `sslmode` values onto the driver.

pub mod client;
pub mod tls;

pub use client::PostgresProbe;
pub use tls::make_tls_connector;
