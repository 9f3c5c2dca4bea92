//! Result type alias for Informe
//!
//! This module provides a convenient Result type alias that uses InformeError
//! as the error type.

use super::errors::InformeError;

/// Result type alias for Informe operations
///
/// # Examples
///
/// ```
/// use informe::domain::result::Result;
/// use informe::domain::errors::InformeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(InformeError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, InformeError>;
