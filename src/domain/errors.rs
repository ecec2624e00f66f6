//! Domain validation errors.

use std::fmt;

/// Reason codes produced by the field validators.
///
/// Each variant is stable and maps to exactly one caller-facing message in
/// the dispatcher, so new variants must be added there too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value was not text (number, object, array, ...).
    NotText,

    /// Shorter than the minimum length after trimming.
    TooShort,

    /// Longer than the maximum length after trimming.
    TooLong,

    /// Contains characters or sequences outside the allowed set.
    InvalidCharacters,

    /// Contains no letters at all.
    MustContainLetters,

    /// Does not reduce to exactly ten digits.
    InvalidPhoneLength,

    /// Ten digits, but the area code starts with 0 or 1.
    InvalidAreaCode,

    /// Input starts with a minus sign.
    NegativeNumber,

    /// The provided email address is invalid.
    InvalidEmail(String),
}

impl ValidationError {
    /// Machine-readable code, suitable for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotText => "not_text",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidCharacters => "invalid_characters",
            Self::MustContainLetters => "must_contain_letters",
            Self::InvalidPhoneLength => "invalid_phone_length",
            Self::InvalidAreaCode => "invalid_area_code",
            Self::NegativeNumber => "negative_number",
            Self::InvalidEmail(_) => "invalid_email",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotText => write!(f, "value must be text"),
            Self::TooShort => write!(f, "value is too short"),
            Self::TooLong => write!(f, "value is too long"),
            Self::InvalidCharacters => write!(f, "value contains invalid characters"),
            Self::MustContainLetters => write!(f, "value must contain letters"),
            Self::InvalidPhoneLength => write!(f, "phone number must have 10 digits"),
            Self::InvalidAreaCode => write!(f, "area code cannot start with 0 or 1"),
            Self::NegativeNumber => write!(f, "phone number cannot be negative"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for ValidationError {}
