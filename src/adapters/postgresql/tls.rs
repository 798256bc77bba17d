//! TLS setup for Postgres connections
//!
//! libpq's `sslmode` controls two independent things: whether TLS is
//! negotiated at all, and how much of the server certificate is verified.
//! The driver only knows the first half (`disable | prefer | require`), so
//! the second half is expressed through the `native-tls` connector.

use crate::config::SslMode;
use crate::domain::{EntrypointError, Result};
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::config::SslMode as DriverSslMode;

/// Negotiation policy handed to `tokio_postgres`
pub fn driver_ssl_mode(mode: SslMode) -> DriverSslMode {
    match mode {
        SslMode::Disable => DriverSslMode::Disable,
        SslMode::Allow | SslMode::Prefer => DriverSslMode::Prefer,
        SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull => DriverSslMode::Require,
    }
}

/// Whether the certificate chain is checked against trusted roots
pub fn verifies_certificate(mode: SslMode) -> bool {
    matches!(mode, SslMode::VerifyCa | SslMode::VerifyFull)
}

/// Whether the certificate must match the host name
pub fn verifies_hostname(mode: SslMode) -> bool {
    matches!(mode, SslMode::VerifyFull)
}

/// Builds the TLS connector for a given SSL mode
///
/// With `disable` the connector is still built but never used, because the
/// driver skips TLS negotiation entirely.
///
/// # Errors
///
/// Returns an error if the platform TLS backend cannot be initialised.
pub fn make_tls_connector(mode: SslMode) -> Result<MakeTlsConnector> {
    let mut builder = native_tls::TlsConnector::builder();
    builder
        .danger_accept_invalid_certs(!verifies_certificate(mode))
        .danger_accept_invalid_hostnames(!verifies_hostname(mode));

    let connector = builder.build().map_err(|e| {
        EntrypointError::Configuration(format!("Failed to build TLS connector: {e}"))
    })?;

    Ok(MakeTlsConnector::new(connector))
}
