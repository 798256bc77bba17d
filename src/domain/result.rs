//! Result type alias for the entrypoint
//!
//! This module provides a convenient Result type alias that uses
//! `EntrypointError` as the error type.

use super::errors::EntrypointError;

/// Result type alias for entrypoint operations
///
/// # Examples
///
/// ```
/// use pay4_entrypoint::domain::result::Result;
/// use pay4_entrypoint::domain::errors::EntrypointError;
///
/// fn example_function() -> Result<u16> {
///     Ok(5432)
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EntrypointError::Configuration("POSTGRES_PORT is not a number".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EntrypointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<u16> {
            Ok(5432)
        }

        let value = inner()?;
        assert_eq!(value, 5432);
        Ok(())
    }
}
