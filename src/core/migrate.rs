//! Schema migrations
//!
//! The migration engine is an external program. The contract it must honour
//! is that re-running it against an up-to-date schema is a no-op and that
//! failure is reported through the exit status. Migrations are never
//! retried here: a failure aborts startup.

use crate::adapters::process::CommandRunner;
use crate::domain::{CommandSpec, EntrypointError, Result};
use std::time::Instant;

/// Runs the migration tool once
///
/// # Errors
///
/// Returns [`EntrypointError::MigrationNotStarted`] if the tool cannot be
/// started and [`EntrypointError::MigrationFailure`] if it exits with
/// anything other than status 0.
pub async fn apply_migrations<R>(runner: &R, command: &CommandSpec) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    tracing::info!(command = %command, "Applying database migrations");
    let started = Instant::now();

    let outcome = runner
        .run(command)
        .await
        .map_err(|e| EntrypointError::MigrationNotStarted {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    if !outcome.success() {
        tracing::error!(command = %command, status = %outcome, "Migration tool failed");
        return Err(EntrypointError::MigrationFailure {
            command: command.to_string(),
            status: outcome.to_string(),
        });
    }

    tracing::info!(
        duration_ms = started.elapsed().as_millis() as u64,
        "Migrations applied"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::process::ExitOutcome;
    use async_trait::async_trait;

    struct FixedRunner(Result<ExitOutcome>);

    #[async_trait]
    impl CommandRunner for FixedRunner {
        async fn run(&self, _command: &CommandSpec) -> Result<ExitOutcome> {
            match &self.0 {
                Ok(outcome) => Ok(*outcome),
                Err(e) => Err(EntrypointError::Io(e.to_string())),
            }
        }
    }

    fn migrate() -> CommandSpec {
        CommandSpec::new("python").args(["manage.py", "migrate", "--noinput"])
    }

    #[tokio::test]
    async fn test_success() {
        let runner = FixedRunner(Ok(ExitOutcome::Exited(0)));
        assert!(apply_migrations(&runner, &migrate()).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let runner = FixedRunner(Ok(ExitOutcome::Exited(1)));
        let err = apply_migrations(&runner, &migrate()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Migration failed: python manage.py migrate --noinput exited with exit status 1"
        );
        assert_eq!(err.exit_code(), crate::domain::errors::EXIT_MIGRATION);
    }

    #[tokio::test]
    async fn test_signal_is_failure() {
        let runner = FixedRunner(Ok(ExitOutcome::Signaled(9)));
        let err = apply_migrations(&runner, &migrate()).await.unwrap_err();
        assert!(matches!(err, EntrypointError::MigrationFailure { .. }));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_reported_as_not_started() {
        let runner = FixedRunner(Err(EntrypointError::Io("not found".to_string())));
        let err = apply_migrations(&runner, &migrate()).await.unwrap_err();

        assert!(matches!(err, EntrypointError::MigrationNotStarted { .. }));
        assert_eq!(err.exit_code(), crate::domain::errors::EXIT_MIGRATION);
        let message = err.to_string();
        assert!(!message.contains("exited with"));
        assert_eq!(
            message,
            "Migration tool could not be started (python manage.py migrate --noinput): \
             I/O error: not found"
        );
    }
}
