// Utility functions

pub mod json_extractor;

use crate::types::*;

/// Validates a value against a constraint and returns an error if it fails
pub fn validate<T, F>(
    value: T,
    constraint: F,
    error_message: impl Into<String>,
) -> ShowcaseResult<T>
where
    F: FnOnce(&T) -> bool,
{
    if constraint(&value) {
        Ok(value)
    } else {
        Err(ShowcaseError::ValidationError(error_message.into()))
    }
}

/// Validates an inclusive range; the message reads "`{subject}` debe estar entre `min` y `max`."
pub fn validate_range<T>(
    value: T,
    min: T,
    max: T,
    subject: &str,
) -> ShowcaseResult<T>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    validate(
        value,
        |&v| v >= min && v <= max,
        format!("{} debe estar entre {} y {}.", subject, min, max),
    )
}

/// Validates a string against common constraints
pub struct StringValidator;

impl StringValidator {
    /// Validates that a string is not empty
    pub fn not_empty(value: impl Into<String>, param_name: &str) -> ShowcaseResult<String> {
        let value = value.into();
        validate(
            value,
            |s| !s.is_empty(),
            format!("{} cannot be empty", param_name),
        )
    }

    /// Rejects strings that are empty after trimming, reporting `message` as is
    pub fn not_blank(value: impl Into<String>, message: &str) -> ShowcaseResult<String> {
        validate(value.into(), |s| !s.trim().is_empty(), message)
    }
}
