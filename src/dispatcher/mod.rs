//! Request dispatcher: the booking admission pipeline.
//!
//! A request moves through
//! `Received → RateChecked → Sanitized → FieldValidated → Classified` and
//! ends in exactly one of `Notified`, `Rejected` or `Failed`. Each terminal
//! state produces exactly one caller-facing message.

pub mod messages;

use crate::config::Config;
use crate::domain::{
    BookingRequest, EmailAddress, Field, FieldInput, ValidatedBooking, ValidationError,
};
use crate::error::{BookingError, BookingResult, NotifierError};
use crate::metrics::{Metrics, NotifierTimer};
use crate::notifier::{BookingNotification, MessageId, Notifier};
use crate::rate_limit::RateLimiter;
use crate::validation::{
    sanitize, validate_address, validate_name, validate_phone, RegionClassification,
    RegionMatcher,
};
use chrono::Utc;
use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

/// Pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStage {
    Received,
    RateChecked,
    Sanitized,
    FieldValidated,
    Classified,
    Notified,
    Rejected,
    Failed,
}

impl DispatchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::RateChecked => "rate_checked",
            Self::Sanitized => "sanitized",
            Self::FieldValidated => "field_validated",
            Self::Classified => "classified",
            Self::Notified => "notified",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Notified | Self::Rejected | Self::Failed)
    }
}

impl fmt::Display for DispatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings the dispatcher needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    pub max_name_length: usize,
    pub max_address_length: usize,
    pub notifier_timeout: Duration,
    pub region_name: String,
    pub mail_from: EmailAddress,
    pub mail_to: Vec<EmailAddress>,
}

impl DispatcherSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_name_length: config.max_name_length,
            max_address_length: config.max_address_length,
            notifier_timeout: Duration::from_secs(config.notifier_timeout_secs),
            region_name: config.region_name.clone(),
            mail_from: config.mail_from.clone(),
            mail_to: config.mail_to.clone(),
        }
    }
}

/// Result of dispatching one request.
#[derive(Debug)]
pub struct DispatchResponse {
    /// Terminal stage: `Notified`, `Rejected` or `Failed`
    pub stage: DispatchStage,

    /// The single message for the caller
    pub message: String,

    /// Region classification, if the request got that far
    pub classification: Option<RegionClassification>,

    /// Id returned by the notifier when `stage` is `Notified`
    pub message_id: Option<MessageId>,

    /// Why the request was not notified (`OutOfRegion` for `Rejected`)
    pub error: Option<BookingError>,
}

impl DispatchResponse {
    pub fn is_success(&self) -> bool {
        self.stage != DispatchStage::Failed
    }
}

/// Orchestrates rate limiting, sanitization, validation, classification and
/// notification for booking requests.
#[derive(Clone)]
pub struct RequestDispatcher {
    limiter: RateLimiter,
    region: Arc<RegionMatcher>,
    notifier: Arc<dyn Notifier>,
    settings: Arc<DispatcherSettings>,
    metrics: Metrics,
}

impl RequestDispatcher {
    pub fn new(
        limiter: RateLimiter,
        region: RegionMatcher,
        notifier: Arc<dyn Notifier>,
        settings: DispatcherSettings,
    ) -> Self {
        Self {
            limiter,
            region: Arc::new(region),
            notifier,
            settings: Arc::new(settings),
            metrics: Metrics::new(),
        }
    }

    /// Record into an existing metrics collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run one request through the pipeline.
    ///
    /// Never fails: every outcome, a panic inside the pipeline included, is
    /// mapped to a response with a caller-facing message.
    pub async fn dispatch(
        &self,
        client_id: Option<&str>,
        request: BookingRequest,
    ) -> DispatchResponse {
        self.metrics.record_request();
        trace_stage(DispatchStage::Received);

        let mut classification = None;
        let result = AssertUnwindSafe(self.run(client_id, request, &mut classification))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(BookingError::InternalError(detail))
            });

        self.respond(result, classification)
    }

    async fn run(
        &self,
        client_id: Option<&str>,
        request: BookingRequest,
        classification: &mut Option<RegionClassification>,
    ) -> BookingResult<(ValidatedBooking, MessageId)> {
        if !self.limiter.admit(client_id) {
            return Err(BookingError::AdmissionDenied);
        }
        trace_stage(DispatchStage::RateChecked);

        let name = sanitize_field(&request.name, self.settings.max_name_length);
        let address = sanitize_field(&request.address, self.settings.max_address_length);
        trace_stage(DispatchStage::Sanitized);

        let name = validate_name(&name)
            .into_result()
            .map_err(invalid(Field::Name))?;
        let phone = validate_phone(&request.phone)
            .into_result()
            .map_err(invalid(Field::Phone))?;
        let address = validate_address(&address)
            .into_result()
            .map_err(invalid(Field::Address))?;
        trace_stage(DispatchStage::FieldValidated);

        let result = self.region.classify(&address);
        let in_region = result.in_region;
        tracing::debug!(
            in_region,
            matched = ?result.matched,
            "Address classified"
        );
        *classification = Some(result);
        trace_stage(DispatchStage::Classified);

        if !in_region {
            return Err(BookingError::OutOfRegion);
        }

        let booking = ValidatedBooking {
            name,
            phone,
            address,
        };
        let message_id = self.notify(&booking).await?;

        Ok((booking, message_id))
    }

    /// Single notifier attempt under a fixed timeout.
    async fn notify(&self, booking: &ValidatedBooking) -> BookingResult<MessageId> {
        let notification = BookingNotification::new(booking, Utc::now());
        let timer = NotifierTimer::new(self.metrics.clone());

        let send = self.notifier.send(
            &self.settings.mail_from,
            &self.settings.mail_to,
            &notification.subject,
            &notification.body,
        );

        match tokio::time::timeout(self.settings.notifier_timeout, send).await {
            Ok(Ok(message_id)) => {
                timer.complete();
                Ok(message_id)
            }
            Ok(Err(e)) => {
                timer.complete_with_error();
                Err(BookingError::NotifierUnavailable(e))
            }
            Err(_) => {
                timer.complete_with_error();
                Err(BookingError::NotifierUnavailable(NotifierError::Timeout))
            }
        }
    }

    fn respond(
        &self,
        result: BookingResult<(ValidatedBooking, MessageId)>,
        classification: Option<RegionClassification>,
    ) -> DispatchResponse {
        match result {
            Ok((booking, message_id)) => {
                tracing::info!(message_id = %message_id, "Booking request forwarded");
                DispatchResponse {
                    stage: DispatchStage::Notified,
                    message: messages::confirmation(&booking),
                    classification,
                    message_id: Some(message_id),
                    error: None,
                }
            }
            Err(error) => {
                let stage = match error {
                    BookingError::OutOfRegion => DispatchStage::Rejected,
                    _ => DispatchStage::Failed,
                };
                self.log_and_count(&error);

                DispatchResponse {
                    stage,
                    message: messages::for_error(&error, &self.settings.region_name),
                    classification,
                    message_id: None,
                    error: Some(error),
                }
            }
        }
    }

    fn log_and_count(&self, error: &BookingError) {
        match error {
            BookingError::AdmissionDenied => {
                self.metrics.record_admission_denied();
                tracing::warn!("Booking request denied by rate limiter");
            }
            BookingError::InvalidInput { field, reason } => {
                self.metrics.record_invalid_input();
                tracing::info!(field = %field, reason = reason.code(), "Booking request invalid");
            }
            BookingError::OutOfRegion => {
                self.metrics.record_out_of_region();
                tracing::info!("Booking request outside service region");
            }
            // Counted by the notifier timer
            BookingError::NotifierUnavailable(e) => {
                tracing::error!("Notifier failed: {}", e);
            }
            BookingError::InternalError(detail) => {
                self.metrics.record_internal_error();
                tracing::error!("Internal error while dispatching booking: {}", detail);
            }
        }
    }
}

/// Sanitize text; keep `Other` as `Other` so validators can report it.
fn sanitize_field(input: &FieldInput, max_length: usize) -> FieldInput {
    match input {
        FieldInput::Text(_) => FieldInput::Text(sanitize(input, max_length)),
        FieldInput::Other => FieldInput::Other,
    }
}

fn invalid(field: Field) -> impl Fn(ValidationError) -> BookingError {
    move |reason| BookingError::InvalidInput { field, reason }
}

fn trace_stage(stage: DispatchStage) {
    tracing::trace!(stage = %stage, "Dispatch stage reached");
}
