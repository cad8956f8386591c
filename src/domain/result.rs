//! Result type alias for Immunize
//!
//! This module provides a convenient Result type alias that uses ImmunizeError
//! as the error type.

use super::errors::ImmunizeError;

/// Result type alias for Immunize operations
///
/// # Examples
///
/// ```
/// use immunize::domain::result::Result;
/// use immunize::domain::errors::ImmunizeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ImmunizeError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ImmunizeError>;
