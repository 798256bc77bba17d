//! Database readiness wait
//!
//! Bounded, fixed-interval polling: up to `max_attempts` probes,
//! `retry_interval` apart, each limited to `attempt_timeout`. There is no
//! backoff and no jitter, so attempt counts and minimum elapsed time are
//! predictable.

use crate::adapters::database::DatabaseProbe;
use crate::config::RetryPolicy;
use crate::domain::{EntrypointError, Result};
use crate::log_retry_attempt;
use tokio::time::{sleep, timeout, Instant};

/// Outcome of a successful readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessReport {
    /// Number of probes made, including the successful one
    pub attempts: u32,

    /// Time from the first probe until the successful one finished
    pub elapsed: std::time::Duration,
}

/// Blocks until `probe` succeeds or the attempt budget is exhausted
///
/// The first successful probe ends the wait; no further probes are made.
/// Every failure (error or timeout) is logged and followed by a sleep of
/// `policy.retry_interval`, except after the final attempt.
///
/// # Errors
///
/// Returns [`EntrypointError::DatabaseUnreachable`] with the last probe
/// error once `policy.max_attempts` consecutive probes have failed.
pub async fn wait_for_database<P>(probe: &P, policy: &RetryPolicy) -> Result<ReadinessReport>
where
    P: DatabaseProbe + ?Sized,
{
    let started = Instant::now();
    let mut last_error = String::from("no attempts were made");

    tracing::info!(
        database = %probe.describe(),
        max_attempts = policy.max_attempts,
        retry_interval_ms = policy.retry_interval.as_millis() as u64,
        "Waiting for database"
    );

    for attempt in 1..=policy.max_attempts {
        let outcome = match timeout(policy.attempt_timeout, probe.probe()).await {
            Ok(result) => result,
            Err(_) => Err(EntrypointError::Database(format!(
                "attempt timed out after {}s",
                policy.attempt_timeout.as_secs_f64()
            ))),
        };

        match outcome {
            Ok(()) => {
                let report = ReadinessReport {
                    attempts: attempt,
                    elapsed: started.elapsed(),
                };
                tracing::info!(
                    attempts = report.attempts,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    "Database is ready"
                );
                return Ok(report);
            }
            Err(e) => {
                last_error = e.to_string();
                if attempt < policy.max_attempts {
                    log_retry_attempt!(attempt, policy.max_attempts, last_error);
                    sleep(policy.retry_interval).await;
                } else {
                    tracing::warn!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        reason = %last_error,
                        "Final readiness attempt failed"
                    );
                }
            }
        }
    }

    tracing::error!(
        attempts = policy.max_attempts,
        last_error = %last_error,
        "Timed out waiting for database"
    );

    Err(EntrypointError::DatabaseUnreachable {
        attempts: policy.max_attempts,
        last_error,
    })
}
