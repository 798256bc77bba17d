//! Database abstraction layer
//!
//! The sequencer only needs to know whether the database answers. This
//! module defines that single capability as a trait so the readiness wait
//! can be driven by a real Postgres connection or by a test double.

pub mod traits;

pub use traits::DatabaseProbe;
