//! EmailAddress value object.

use super::errors::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;

const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 255;

/// A type-safe wrapper for email addresses.
///
/// Used for the notifier's sender and recipients, which come from
/// configuration rather than from end users. The check is syntactic only.
///
/// # Example
///
/// ```
/// use booking_mcp_server::domain::EmailAddress;
///
/// let email = EmailAddress::new("bookings@example.com").unwrap();
/// assert_eq!(email.as_str(), "bookings@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Exactly one '@' symbol
    /// - Non-empty local part of at most 64 characters
    /// - Non-empty domain of at most 255 characters
    /// - Domain does not start or end with '.' and has no '..'
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the email format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if domain.contains('@') {
            return false;
        }

        if local.is_empty() || local.chars().count() > MAX_LOCAL_LEN {
            return false;
        }

        if domain.is_empty() || domain.chars().count() > MAX_DOMAIN_LEN {
            return false;
        }

        !(domain.starts_with('.') || domain.ends_with('.') || domain.contains(".."))
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Serde support - serialize as string
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
