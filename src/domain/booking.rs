//! Booking request types.

use super::input::FieldInput;
use super::phone::PhoneNumber;
use std::fmt;

/// The fields a booking request carries, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Address,
}

impl Field {
    /// Field name as it appears in the inbound JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An incoming booking request, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub name: FieldInput,
    pub phone: FieldInput,
    pub address: FieldInput,
}

impl BookingRequest {
    pub fn new(
        name: impl Into<FieldInput>,
        phone: impl Into<FieldInput>,
        address: impl Into<FieldInput>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

/// A request whose fields all passed sanitization and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub name: String,
    pub phone: PhoneNumber,
    pub address: String,
}
