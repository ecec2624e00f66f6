//! Notification content for an accepted booking.

use crate::domain::ValidatedBooking;
use chrono::{DateTime, Utc};

/// Subject and plain-text body describing one booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingNotification {
    pub subject: String,
    pub body: String,
}

impl BookingNotification {
    pub fn new(booking: &ValidatedBooking, submitted_at: DateTime<Utc>) -> Self {
        let subject = format!("New Cleaning Request: {}", booking.name);
        let body = format!(
            "A new cleaning request was submitted.\n\n\
             Name: {}\n\
             Phone: {}\n\
             Address: {}\n\
             Submitted: {}\n",
            booking.name,
            booking.phone,
            booking.address,
            submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        );

        Self { subject, body }
    }
}
