//! Result type alias for the ingestion pipeline

use super::errors::NrptiError;

/// Result type alias using `NrptiError` as the error type
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use nrpti::domain::result::Result;
/// use nrpti::domain::errors::NrptiError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(NrptiError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, NrptiError>;
