//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("child_name");
        assert_eq!(format!("{}", err), "Field 'child_name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("question_number", 1, 10, 12);
        assert_eq!(
            format!("{}", err),
            "Field 'question_number' must be between 1 and 10, got 12"
        );
    }

    #[test]
    fn validation_error_supports_equality() {
        assert_eq!(
            ValidationError::empty_field("child_name"),
            ValidationError::empty_field("child_name")
        );
        assert_ne!(
            ValidationError::empty_field("child_name"),
            ValidationError::empty_field("parent_name")
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("option", "expected a letter A-E");
        assert_eq!(
            format!("{}", err),
            "Field 'option' has invalid format: expected a letter A-E"
        );
    }
}
