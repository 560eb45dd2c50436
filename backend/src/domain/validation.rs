//! Validation helpers shared by the store's write-model types.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Field-level validation failures raised while building write-model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be between {min} and {max} characters")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
    #[error("{field} must contain at least one entry")]
    EmptyCollection { field: &'static str },
}

pub(crate) fn validate_non_empty(
    value: String,
    field: &'static str,
) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value)
}

pub(crate) fn ensure_length_at_most(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub(crate) fn ensure_length_between(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length < min || length > max {
        return Err(ValidationError::LengthOutOfRange { field, min, max });
    }
    Ok(())
}

/// Reject zero, negative, and non-finite amounts.
pub(crate) fn ensure_positive_amount(
    value: f64,
    field: &'static str,
) -> Result<(), ValidationError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern must compile")
    })
}

pub(crate) fn validate_email(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if !email_pattern().is_match(value) {
        return Err(ValidationError::InvalidEmail { field });
    }
    Ok(())
}

/// True when `value` looks like a 24-character lowercase-insensitive hex key.
pub(crate) fn is_hex_object_key(value: &str) -> bool {
    value.len() == 24 && value.bytes().all(|byte| byte.is_ascii_hexdigit())
}
