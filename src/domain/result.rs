//! Result type alias for PFT Extract

use super::errors::PftError;

/// Result type alias for PFT Extract operations
///
/// # Examples
///
/// ```
/// use pft_extract::domain::result::Result;
/// use pft_extract::domain::errors::PftError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PftError::MissingElement("Subject".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PftError>;
