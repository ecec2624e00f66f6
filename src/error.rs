//! Error types for the Booking MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::{Field, ValidationError};
use thiserror::Error;

/// Errors that can occur when delivering a booking notification.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Mail API returned an error status code
    #[error("Mail API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout, or the bounded wait elapsed
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Mail API rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Every way a booking request can end short of a sent notification.
///
/// `OutOfRegion` is a business outcome rather than a failure, but it travels
/// through the same channel so the dispatcher maps all of them in one place.
#[derive(Error, Debug)]
pub enum BookingError {
    /// The caller exceeded the rate limit
    #[error("Admission denied by rate limiter")]
    AdmissionDenied,

    /// A field failed validation
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: Field,
        reason: ValidationError,
    },

    /// The address is outside the serviced region
    #[error("Address is outside the service region")]
    OutOfRegion,

    /// The notifier failed or timed out
    #[error("Notifier unavailable: {0}")]
    NotifierUnavailable(#[source] NotifierError),

    /// Anything unexpected
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for Results with NotifierError
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with BookingError
pub type BookingResult<T> = Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::MissingVar("MAIL_API_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: MAIL_API_KEY"
        );

        let err = NotifierError::Timeout;
        assert_eq!(err.to_string(), "Request timeout");

        let err = BookingError::AdmissionDenied;
        assert_eq!(err.to_string(), "Admission denied by rate limiter");
    }

    #[test]
    fn test_invalid_input_display() {
        let err = BookingError::InvalidInput {
            field: Field::Name,
            reason: ValidationError::TooShort,
        };
        assert!(err.to_string().contains("name"));
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_notifier_error_is_source() {
        use std::error::Error as _;

        let err = BookingError::NotifierUnavailable(NotifierError::ApiError {
            status: 502,
            message: "Bad gateway".to_string(),
        });
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("502"));
    }
}
