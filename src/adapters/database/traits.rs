//! Database abstraction traits

use crate::domain::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A single readiness check against the database
///
/// Implementations open a fresh connection, run a trivial query and close
/// the connection again. They must be read-only so the check can be
/// repeated any number of times.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Run one readiness attempt
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the query fails.
    async fn probe(&self) -> Result<()>;

    /// Target description for logs, without credentials
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: DatabaseProbe + ?Sized> DatabaseProbe for Arc<T> {
    async fn probe(&self) -> Result<()> {
        (**self).probe().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
