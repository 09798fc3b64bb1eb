//! Numeric validators shared by spec validation and engine constructors.

use std::fmt;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that a value is finite (not NaN or infinite).
///
/// # Example
/// ```
/// use sigcodec_spec::validation::common::validate_finite;
///
/// assert!(validate_finite("offset", -3.0).is_ok());
/// assert!(validate_finite("offset", f64::NAN).is_err());
/// ```
pub fn validate_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is positive (> 0).
///
/// # Arguments
/// * `name` - Name of the parameter (for error messages)
/// * `value` - Value to validate
///
/// # Returns
/// * `Ok(())` if value is positive
/// * `Err(CommonValidationError)` if value is <= 0 or not finite
///
/// # Example
/// ```
/// use sigcodec_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("delta", 0.1).is_ok());
/// assert!(validate_positive("delta", 0.0).is_err());
/// assert!(validate_positive("delta", -1.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is non-negative (>= 0).
///
/// # Example
/// ```
/// use sigcodec_spec::validation::common::validate_non_negative;
///
/// assert!(validate_non_negative("frequency", 0.0).is_ok());
/// assert!(validate_non_negative("frequency", -1.0).is_err());
/// ```
pub fn validate_non_negative(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value < 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is within a specified range [min, max].
///
/// # Arguments
/// * `name` - Name of the parameter (for error messages)
/// * `value` - Value to validate
/// * `min` - Minimum allowed value (inclusive)
/// * `max` - Maximum allowed value (inclusive)
///
/// # Example
/// ```
/// use sigcodec_spec::validation::common::validate_range;
///
/// assert!(validate_range("n_bits", 8.0, 1.0, 16.0).is_ok());
/// assert!(validate_range("n_bits", 20.0, 1.0, 16.0).is_err());
/// ```
pub fn validate_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value < min || value > max {
        return Err(CommonValidationError::new(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}
