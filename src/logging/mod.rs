//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable or JSON-formatted output
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Output on stderr, so stdout stays free for the children
//!
//! # Example
//!
//! ```no_run
//! use pay4_entrypoint::logging::{init_logging, LogFormat};
//!
//! init_logging("info", LogFormat::Text).expect("Failed to initialize logging");
//!
//! tracing::info!("Entrypoint started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LogFormat};

/// Log a move between two startup stages
///
/// # Example
///
/// ```no_run
/// use pay4_entrypoint::log_stage_transition;
/// use pay4_entrypoint::domain::Stage;
///
/// log_stage_transition!(Stage::ConfigLoaded, Stage::WaitingForDb);
/// ```
#[macro_export]
macro_rules! log_stage_transition {
    ($from:expr, $to:expr) => {
        tracing::info!(
            from = %$from,
            to = %$to,
            "Stage transition"
        );
    };
}

/// Log a failed attempt that will be retried
///
/// # Example
///
/// ```no_run
/// use pay4_entrypoint::log_retry_attempt;
///
/// log_retry_attempt!(2, 60, "connection refused");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Database not ready, retrying"
        );
    };
}
