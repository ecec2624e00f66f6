//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for domain concepts like
//! email addresses and phone numbers, plus the booking request itself.
//! Value objects validate at construction time and prevent invalid data
//! from being represented in the system.

pub mod booking;
pub mod email;
pub mod errors;
pub mod input;
pub mod phone;

pub use booking::{BookingRequest, Field, ValidatedBooking};
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use input::FieldInput;
pub use phone::PhoneNumber;
