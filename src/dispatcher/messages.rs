//! Caller-facing reply text.
//!
//! Every terminal state maps to exactly one of these. The text is stable:
//! clients may show it verbatim, so it never includes error details.

use crate::domain::{Field, ValidatedBooking, ValidationError};
use crate::error::BookingError;

pub const MISSING_FIELDS: &str =
    "Missing required fields: please provide your name, phone number, and address.";

pub const ADMISSION_DENIED: &str =
    "Too many requests. Please wait a few minutes before trying again.";

pub const INVALID_NAME_LENGTH: &str = "Please provide a valid name between 2 and 100 characters.";

pub const INVALID_NAME_CHARACTERS: &str =
    "Name can only contain letters, spaces, hyphens, and apostrophes.";

pub const NAME_NEEDS_LETTERS: &str = "Name must contain at least one letter.";

pub const INVALID_NAME: &str = "Please provide your name as text.";

pub const INVALID_PHONE: &str = "Please provide a valid 10-digit US phone number.";

pub const INVALID_ADDRESS: &str = "Please provide a complete service address.";

pub const NOTIFIER_UNAVAILABLE: &str =
    "Sorry, we couldn't submit your request right now. Please try again in a few minutes.";

pub const INTERNAL_ERROR: &str =
    "Something went wrong while processing your request. Please try again later.";

/// Decline for addresses outside the service region.
pub fn out_of_region(region_name: &str) -> String {
    format!(
        "Thanks for reaching out! Unfortunately, we currently only provide cleaning \
         services in {}. We hope to serve your area in the future.",
        region_name
    )
}

/// Confirmation once the booking has been handed to the notifier.
pub fn confirmation(booking: &ValidatedBooking) -> String {
    format!(
        "Thank you, {}! Your cleaning request has been received. We'll call you at {} \
         shortly to confirm your appointment.",
        booking.name, booking.phone
    )
}

/// Reply text for a failed or declined request.
pub fn for_error(error: &BookingError, region_name: &str) -> String {
    match error {
        BookingError::AdmissionDenied => ADMISSION_DENIED.to_string(),
        BookingError::InvalidInput { field, reason } => invalid_input(*field, reason).to_string(),
        BookingError::OutOfRegion => out_of_region(region_name),
        BookingError::NotifierUnavailable(_) => NOTIFIER_UNAVAILABLE.to_string(),
        BookingError::InternalError(_) => INTERNAL_ERROR.to_string(),
    }
}

fn invalid_input(field: Field, reason: &ValidationError) -> &'static str {
    match (field, reason) {
        (Field::Name, ValidationError::TooShort | ValidationError::TooLong) => INVALID_NAME_LENGTH,
        (Field::Name, ValidationError::InvalidCharacters) => INVALID_NAME_CHARACTERS,
        (Field::Name, ValidationError::MustContainLetters) => NAME_NEEDS_LETTERS,
        (Field::Name, _) => INVALID_NAME,
        (Field::Phone, _) => INVALID_PHONE,
        (Field::Address, _) => INVALID_ADDRESS,
    }
}
