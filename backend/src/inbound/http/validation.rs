//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, ValidationError};

fn field_of(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::EmptyField { field }
        | ValidationError::TooLong { field, .. }
        | ValidationError::LengthOutOfRange { field, .. }
        | ValidationError::NotPositive { field }
        | ValidationError::InvalidEmail { field }
        | ValidationError::OutOfRange { field, .. }
        | ValidationError::EmptyCollection { field } => field,
    }
}

fn code_of(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::EmptyField { .. } => "empty_field",
        ValidationError::TooLong { .. } => "too_long",
        ValidationError::LengthOutOfRange { .. } => "length_out_of_range",
        ValidationError::NotPositive { .. } => "not_positive",
        ValidationError::InvalidEmail { .. } => "invalid_email",
        ValidationError::OutOfRange { .. } => "out_of_range",
        ValidationError::EmptyCollection { .. } => "empty_collection",
    }
}

/// Convert a write-model validation failure into a client-facing request error.
///
/// The human-readable message is the validation error itself; the structured
/// details carry the offending field and a stable machine code.
pub(crate) fn invalid_payload_error(error: ValidationError) -> Error {
    Error::invalid_argument(error.to_string()).with_details(json!({
        "field": field_of(&error),
        "code": code_of(&error),
    }))
}
