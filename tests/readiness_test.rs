//! Integration tests for the database readiness wait
//!
//! These run on tokio's paused clock, so a 60 x 2s budget finishes
//! instantly while elapsed-time assertions stay exact.

use async_trait::async_trait;
use pay4_entrypoint::adapters::database::DatabaseProbe;
use pay4_entrypoint::config::RetryPolicy;
use pay4_entrypoint::core::wait_for_database;
use pay4_entrypoint::domain::{EntrypointError, Result};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Fails a fixed number of times, then succeeds forever
struct FlakyProbe {
    failures_before_success: Option<u32>,
    attempts: Mutex<Vec<Instant>>,
}

impl FlakyProbe {
    fn succeeding_after(failures: u32) -> Self {
        Self {
            failures_before_success: Some(failures),
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn never_succeeding() -> Self {
        Self {
            failures_before_success: None,
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn attempt_times(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatabaseProbe for FlakyProbe {
    async fn probe(&self) -> Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(Instant::now());
            attempts.len() as u32
        };

        match self.failures_before_success {
            Some(failures) if attempt > failures => Ok(()),
            _ => Err(EntrypointError::Database(format!(
                "connection refused (attempt {attempt})"
            ))),
        }
    }

    fn describe(&self) -> String {
        "flaky".to_string()
    }
}

#[tokio::test(start_paused = true)]
async fn test_three_failures_then_success() {
    let probe = FlakyProbe::succeeding_after(3);
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 60);
    assert_eq!(policy.retry_interval, Duration::from_secs(2));

    let started = Instant::now();
    let report = wait_for_database(&probe, &policy).await.unwrap();
    let waited = started.elapsed();

    assert_eq!(report.attempts, 4);
    assert_eq!(probe.attempt_times().len(), 4);
    assert!(waited >= Duration::from_secs(6), "waited {waited:?}");
    assert!(waited < Duration::from_secs(7), "waited {waited:?}");
}

#[tokio::test(start_paused = true)]
async fn test_first_attempt_success_does_not_sleep() {
    let probe = FlakyProbe::succeeding_after(0);

    let started = Instant::now();
    let report = wait_for_database(&probe, &RetryPolicy::default())
        .await
        .unwrap();

    assert_eq!(report.attempts, 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_no_attempts_after_success() {
    let probe = FlakyProbe::succeeding_after(5);
    let report = wait_for_database(&probe, &RetryPolicy::default())
        .await
        .unwrap();
    assert_eq!(report.attempts, 6);

    // Give any stray background work a chance to run
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(probe.attempt_times().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_never_reachable_exhausts_budget() {
    let probe = FlakyProbe::never_succeeding();
    let policy = RetryPolicy::default();

    let started = Instant::now();
    let err = wait_for_database(&probe, &policy).await.unwrap_err();

    let times = probe.attempt_times();
    assert_eq!(times.len(), 60);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= policy.retry_interval);
    }
    // 59 gaps between 60 attempts, no sleep after the last one
    assert_eq!(started.elapsed(), Duration::from_secs(118));

    match err {
        EntrypointError::DatabaseUnreachable {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 60);
            assert!(last_error.contains("attempt 60"), "{last_error}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_custom_policy_is_respected() {
    let probe = FlakyProbe::never_succeeding();
    let policy = RetryPolicy {
        max_attempts: 3,
        retry_interval: Duration::from_millis(500),
        attempt_timeout: Duration::from_secs(1),
    };

    let started = Instant::now();
    let err = wait_for_database(&probe, &policy).await.unwrap_err();

    assert_eq!(probe.attempt_times().len(), 3);
    assert_eq!(started.elapsed(), Duration::from_secs(1));
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_wait_is_repeatable() {
    let policy = RetryPolicy::default();

    for _ in 0..2 {
        let probe = FlakyProbe::succeeding_after(1);
        let report = wait_for_database(&probe, &policy).await.unwrap();
        assert_eq!(report.attempts, 2);
    }
}
