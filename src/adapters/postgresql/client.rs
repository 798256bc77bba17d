//! PostgreSQL readiness probe
//!
//! Each probe opens a dedicated connection, runs `SELECT 1` and drops the
//! connection. No pool is kept: the probe runs before migrations and must
//! not hold sessions open while the migration tool works.

use super::tls::{driver_ssl_mode, make_tls_connector};
use crate::adapters::database::DatabaseProbe;
use crate::config::ConnectionTarget;
use crate::domain::{EntrypointError, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::time::Duration;

const APPLICATION_NAME: &str = "pay4-entrypoint";

/// Postgres implementation of [`DatabaseProbe`]
#[derive(Debug, Clone)]
pub struct PostgresProbe {
    /// Where to connect
    target: ConnectionTarget,

    /// Driver-level connect timeout
    connect_timeout: Duration,
}

impl PostgresProbe {
    /// Create a new probe
    ///
    /// # Arguments
    ///
    /// * `target` - Connection target resolved from the environment
    /// * `connect_timeout` - Upper bound for establishing the connection
    pub fn new(target: ConnectionTarget, connect_timeout: Duration) -> Self {
        Self {
            target,
            connect_timeout,
        }
    }

    /// Builds the driver configuration from the connection target
    pub fn pg_config(&self) -> tokio_postgres::Config {
        let password: &str = self.target.password.expose_secret().as_ref();
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.target.host)
            .port(self.target.port)
            .dbname(&self.target.database)
            .user(&self.target.user)
            .password(password)
            .ssl_mode(driver_ssl_mode(self.target.ssl_mode))
            .connect_timeout(self.connect_timeout)
            .application_name(APPLICATION_NAME);
        config
    }
}

#[async_trait]
impl DatabaseProbe for PostgresProbe {
    async fn probe(&self) -> Result<()> {
        let tls = make_tls_connector(self.target.ssl_mode)?;
        let (client, connection) = self.pg_config().connect(tls).await?;

        // The connection object drives the socket; it finishes once the
        // client is dropped at the end of this function.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::debug!(error = %e, "Probe connection closed with error");
            }
        });

        let row = client.query_one("SELECT 1", &[]).await?;
        let value: i32 = row.try_get(0)?;
        if value != 1 {
            return Err(EntrypointError::Database(format!(
                "Liveness query returned {value}, expected 1"
            )));
        }

        tracing::debug!(database = %self.describe(), "PostgreSQL liveness query succeeded");
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "postgresql://{}@{} (sslmode={})",
            self.target.user,
            self.target.display_safe(),
            self.target.ssl_mode
        )
    }
}
