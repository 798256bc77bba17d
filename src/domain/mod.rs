//! Domain types for the entrypoint.
//!
//! This module contains the types every stage shares:
//! - **Error types** ([`EntrypointError`]) and the [`Result`] alias
//! - **Startup stages** ([`Stage`]), the linear state machine
//! - **Command descriptions** ([`CommandSpec`]) for the external collaborators
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, EntrypointError>`], and each
//! error maps onto a process exit status:
//!
//! ```rust
//! use pay4_entrypoint::domain::{EntrypointError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(EntrypointError::MissingEnvironment {
//!         names: vec!["POSTGRES_HOST".to_string()],
//!     })
//! }
//!
//! assert_eq!(example().unwrap_err().exit_code(), 2);
//! ```

pub mod command;
pub mod errors;
pub mod result;
pub mod stage;

// Re-export commonly used types for convenience
pub use command::CommandSpec;
pub use errors::EntrypointError;
pub use result::Result;
pub use stage::Stage;
