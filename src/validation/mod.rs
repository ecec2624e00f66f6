//! Input sanitization and field validation.
//!
//! Every validator is total over [`FieldInput`]: non-text input is reported
//! as [`ValidationError::NotText`], never as a panic or a protocol error.

pub mod name;
pub mod region;
pub mod sanitizer;

pub use name::validate_name;
pub use region::{RegionClassification, RegionMatcher, RegionRule};
pub use sanitizer::{sanitize, sanitize_str, DEFAULT_MAX_LENGTH};

use crate::domain::{FieldInput, PhoneNumber, ValidationError};

/// Minimum length of a sanitized address.
pub const MIN_ADDRESS_LENGTH: usize = 5;

/// Result of running one validator over one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome<T = String> {
    /// The field is acceptable; carries the normalized value.
    Valid(T),
    /// The field was rejected for the given reason.
    Invalid(ValidationError),
}

impl<T> ValidationOutcome<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Convert into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<T, ValidationError> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(reason) => Err(reason),
        }
    }
}

impl<T> From<Result<T, ValidationError>> for ValidationOutcome<T> {
    fn from(result: Result<T, ValidationError>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(reason) => Self::Invalid(reason),
        }
    }
}

/// Validate and normalize a phone number from raw (unsanitized) input.
pub fn validate_phone(input: &FieldInput) -> ValidationOutcome<PhoneNumber> {
    match input {
        FieldInput::Text(text) => PhoneNumber::new(text).into(),
        FieldInput::Other => ValidationOutcome::Invalid(ValidationError::NotText),
    }
}

/// Check a sanitized address against the minimum length floor.
///
/// Region membership is decided separately by [`RegionMatcher`].
pub fn validate_address(input: &FieldInput) -> ValidationOutcome {
    let Some(text) = input.as_text() else {
        return ValidationOutcome::Invalid(ValidationError::NotText);
    };

    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_ADDRESS_LENGTH {
        return ValidationOutcome::Invalid(ValidationError::TooShort);
    }

    ValidationOutcome::Valid(trimmed.to_string())
}
