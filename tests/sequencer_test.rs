//! Integration tests for the startup sequence
//!
//! The database, the migration tool and the server are replaced by
//! recording doubles, so these tests check ordering and stage handling
//! without Postgres or child processes.

use async_trait::async_trait;
use pay4_entrypoint::adapters::database::DatabaseProbe;
use pay4_entrypoint::adapters::process::{CommandRunner, ExitOutcome, Launcher};
use pay4_entrypoint::config::{load_config_with, EntrypointConfig, RetryPolicy};
use pay4_entrypoint::core::StartupSequencer;
use pay4_entrypoint::domain::{CommandSpec, EntrypointError, Result, Stage};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Everything the doubles observed, in order
#[derive(Default)]
struct Journal {
    events: Mutex<Vec<String>>,
}

impl Journal {
    fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

struct ScriptedProbe {
    journal: Arc<Journal>,
    failures: u32,
    calls: AtomicU32,
}

#[async_trait]
impl DatabaseProbe for ScriptedProbe {
    async fn probe(&self) -> Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.journal.record("probe");
        if call <= self.failures {
            Err(EntrypointError::Database("the database system is starting up".to_string()))
        } else {
            Ok(())
        }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

struct RecordingRunner {
    journal: Arc<Journal>,
    exit_code: i32,
    commands: Arc<Mutex<Vec<CommandSpec>>>,
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ExitOutcome> {
        self.journal.record("migrate");
        self.commands.lock().unwrap().push(command.clone());
        Ok(ExitOutcome::Exited(self.exit_code))
    }
}

/// Records the handoff instead of performing it
struct RecordingLauncher {
    journal: Arc<Journal>,
    launched: Arc<Mutex<Vec<CommandSpec>>>,
}

impl Launcher for RecordingLauncher {
    fn handoff(&self, command: &CommandSpec) -> EntrypointError {
        self.journal.record("launch");
        self.launched.lock().unwrap().push(command.clone());
        EntrypointError::Launch("handoff recorded".to_string())
    }
}

struct Harness {
    journal: Arc<Journal>,
    sequencer: StartupSequencer<Arc<ScriptedProbe>, RecordingRunner, RecordingLauncher>,
    migrations: Arc<Mutex<Vec<CommandSpec>>>,
    launched: Arc<Mutex<Vec<CommandSpec>>>,
}

fn config() -> EntrypointConfig {
    let vars = [
        ("POSTGRES_HOST", "db"),
        ("POSTGRES_DB", "pay4"),
        ("POSTGRES_USER", "pay4app"),
        ("POSTGRES_PASSWORD", "pw"),
        ("POSTGRES_SSLMODE", "disable"),
    ];
    let mut config = load_config_with(None, |key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .unwrap();
    config.retry = RetryPolicy {
        max_attempts: 5,
        retry_interval: Duration::from_secs(2),
        attempt_timeout: Duration::from_secs(5),
    };
    config
}

fn harness(probe_failures: u32, migrate_exit: i32) -> Harness {
    let journal = Arc::new(Journal::default());
    let migrations = Arc::new(Mutex::new(Vec::new()));
    let launched = Arc::new(Mutex::new(Vec::new()));

    let probe = Arc::new(ScriptedProbe {
        journal: journal.clone(),
        failures: probe_failures,
        calls: AtomicU32::new(0),
    });
    let runner = RecordingRunner {
        journal: journal.clone(),
        exit_code: migrate_exit,
        commands: migrations.clone(),
    };
    let launcher = RecordingLauncher {
        journal: journal.clone(),
        launched: launched.clone(),
    };

    Harness {
        journal,
        sequencer: StartupSequencer::new(config(), probe, runner, launcher),
        migrations,
        launched,
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_sequence_runs_in_order() {
    let mut h = harness(2, 0);

    let err = h.sequencer.run().await.unwrap_err();

    assert!(matches!(err, EntrypointError::Launch(_)));
    assert_eq!(
        h.journal.events(),
        vec!["probe", "probe", "probe", "migrate", "launch"]
    );
    assert_eq!(h.sequencer.stage(), Stage::Serving);
}

#[tokio::test(start_paused = true)]
async fn test_successful_migration_launches_on_fixed_address() {
    let mut h = harness(0, 0);

    let _ = h.sequencer.run().await;

    let launched = h.launched.lock().unwrap().clone();
    assert_eq!(launched.len(), 1);
    let server = &launched[0];
    assert_eq!(server.program, "gunicorn");
    assert_eq!(
        server.args,
        vec!["--bind", "0.0.0.0:8000", "pay4.wsgi:application"]
    );
    assert_eq!(
        server.env_value("DJANGO_SETTINGS_MODULE"),
        Some("pay4.settings")
    );
}

#[tokio::test(start_paused = true)]
async fn test_migration_runs_without_extra_arguments() {
    let mut h = harness(0, 0);

    let _ = h.sequencer.run().await;

    let commands = h.migrations.lock().unwrap().clone();
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].to_string(),
        "python manage.py migrate --noinput"
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_migration_never_launches_server() {
    let mut h = harness(0, 1);

    let err = h.sequencer.run().await.unwrap_err();

    assert!(matches!(err, EntrypointError::MigrationFailure { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(h.launched.lock().unwrap().is_empty());
    assert_eq!(h.journal.events(), vec!["probe", "migrate"]);
    assert_eq!(h.sequencer.stage(), Stage::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_database_never_migrates() {
    let mut h = harness(u32::MAX, 0);

    let err = h.sequencer.run().await.unwrap_err();

    assert!(matches!(
        err,
        EntrypointError::DatabaseUnreachable { attempts: 5, .. }
    ));
    assert_eq!(err.exit_code(), 4);
    assert!(h.migrations.lock().unwrap().is_empty());
    assert!(h.launched.lock().unwrap().is_empty());
    assert_eq!(h.sequencer.stage(), Stage::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_rerun_against_migrated_database_reaches_same_state() {
    // Each container restart builds a fresh sequencer; an up-to-date
    // schema makes the migration tool a no-op that exits 0.
    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let mut h = harness(0, 0);
        let err = h.sequencer.run().await.unwrap_err();
        outcomes.push((h.sequencer.stage(), err.exit_code(), h.journal.events()));
    }

    assert_eq!(outcomes[0], outcomes[1]);
    assert_eq!(outcomes[0].0, Stage::Serving);
}
