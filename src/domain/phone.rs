//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A North American phone number in canonical `DDD-DDD-DDDD` form.
///
/// Construction accepts free-form text and normalizes it, so two inputs
/// that differ only in punctuation produce equal values.
///
/// # Example
///
/// ```
/// use booking_mcp_server::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+1 (415) 555-1234").unwrap();
/// assert_eq!(phone.as_str(), "415-555-1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and normalize a phone number.
    ///
    /// # Validation Rules
    ///
    /// - The trimmed input must not start with '-'
    /// - All non-digit characters are discarded
    /// - Eleven digits with a leading '1' drop the country code
    /// - Exactly ten digits must remain
    /// - The area code must not start with '0' or '1'
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` describing the first rule that failed.
    pub fn new(phone: &str) -> Result<Self, ValidationError> {
        if phone.trim_start().starts_with('-') {
            return Err(ValidationError::NegativeNumber);
        }

        let mut digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() == 11 && digits.starts_with('1') {
            digits.remove(0);
        }

        if digits.len() != 10 {
            return Err(ValidationError::InvalidPhoneLength);
        }

        if digits.starts_with('0') || digits.starts_with('1') {
            return Err(ValidationError::InvalidAreaCode);
        }

        Ok(Self(format!(
            "{}-{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..10]
        )))
    }

    /// Get the canonical form as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_canonical_is_fixed_point() {
        let phone = PhoneNumber::new("415-555-1234").unwrap();
        assert_eq!(phone.as_str(), "415-555-1234");
    }

    #[test]
    fn test_phone_normalizes_formats() {
        for input in [
            "4155551234",
            "(415) 555-1234",
            "415.555.1234",
            "+1 415 555 1234",
            "14155551234",
            "  415 555 1234  ",
        ] {
            assert_eq!(
                PhoneNumber::new(input).unwrap().as_str(),
                "415-555-1234",
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_phone_rejects_wrong_length() {
        assert_eq!(
            PhoneNumber::new(""),
            Err(ValidationError::InvalidPhoneLength)
        );
        assert_eq!(
            PhoneNumber::new("555-1234"),
            Err(ValidationError::InvalidPhoneLength)
        );
        assert_eq!(
            PhoneNumber::new("24155551234"),
            Err(ValidationError::InvalidPhoneLength)
        );
        assert_eq!(
            PhoneNumber::new("415555123456"),
            Err(ValidationError::InvalidPhoneLength)
        );
    }

    #[test]
    fn test_phone_rejects_bad_area_code() {
        assert_eq!(
            PhoneNumber::new("0155551234"),
            Err(ValidationError::InvalidAreaCode)
        );
        assert_eq!(
            PhoneNumber::new("1155551234"),
            Err(ValidationError::InvalidAreaCode)
        );
        // Country code stripped, then area code 1xx
        assert_eq!(
            PhoneNumber::new("11155551234"),
            Err(ValidationError::InvalidAreaCode)
        );
    }

    #[test]
    fn test_phone_rejects_leading_minus() {
        assert_eq!(
            PhoneNumber::new("-4155551234"),
            Err(ValidationError::NegativeNumber)
        );
        assert_eq!(
            PhoneNumber::new("  -415-555-1234"),
            Err(ValidationError::NegativeNumber)
        );
    }

    #[test]
    fn test_phone_serialization() {
        let phone = PhoneNumber::new("4155551234").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"415-555-1234\"");
    }
}
