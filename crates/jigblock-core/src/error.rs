//! Error types for parameter validation.
//!
//! Generation itself trusts its inputs; these errors are raised by the
//! layers that accept parameters from the outside (settings files, CLI).

use thiserror::Error;

/// Errors related to puzzle parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Dimensions are invalid (zero, negative or not finite).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A parameter value could not be interpreted.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "grid_x".to_string(),
            value: 0.0,
            min: 1.0,
            max: 64.0,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'grid_x' out of range: 0 (valid: 1..64)"
        );

        let err = ParameterError::InvalidDimensions("depth must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid dimensions: depth must be positive");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ParameterError::InvalidValue {
            name: "side_color".to_string(),
            reason: "expected #rrggbb".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'side_color': expected #rrggbb"
        );
    }
}
