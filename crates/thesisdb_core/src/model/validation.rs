//! Validation error type and shared field checks.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection of input before any persistence attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent.
    Required { field: &'static str },
    /// Field is present but does not match its expected shape.
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },
    /// Field exceeds its character limit.
    TooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    TooFewKeywords { min: usize, actual: usize },
    TooManyKeywords { max: usize, actual: usize },
    /// Another user already owns this login name.
    DuplicateLoginName,
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::InvalidFormat { field, .. }
            | Self::TooLong { field, .. } => field,
            Self::TooFewKeywords { .. } | Self::TooManyKeywords { .. } => "keywords",
            Self::DuplicateLoginName => "login_name",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{field} is required"),
            Self::InvalidFormat { field, expected } => {
                write!(f, "{field} has an invalid format: expected {expected}")
            }
            Self::TooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "{field} is too long: {actual_chars} characters (max {max_chars})"
            ),
            Self::TooFewKeywords { min, actual } => {
                write!(f, "too few keywords: at least {min} are required, got {actual}")
            }
            Self::TooManyKeywords { max, actual } => {
                write!(f, "too many keywords: at most {max} are allowed, got {actual}")
            }
            Self::DuplicateLoginName => write!(f, "login_name is already in use"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    value.ok_or(ValidationError::Required { field })
}

pub(crate) fn within_limit(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(value.to_string())
}

/// Absent optional text becomes `""`; present text must fit `max_chars`.
pub(crate) fn optional_within_limit(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<String, ValidationError> {
    within_limit(field, value.unwrap_or_default(), max_chars)
}

pub(crate) fn required_within_limit(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<String, ValidationError> {
    within_limit(field, required(field, value)?, max_chars)
}
