//! Basic metrics instrumentation for the booking pipeline.
//!
//! Provides counters for each terminal outcome and duration tracking for
//! notifier calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for the request dispatcher.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of booking requests received
    requests_total: Arc<AtomicU64>,

    /// Requests turned away by the rate limiter
    admission_denied_total: Arc<AtomicU64>,

    /// Requests that failed field validation
    invalid_input_total: Arc<AtomicU64>,

    /// Requests declined as outside the service region
    out_of_region_total: Arc<AtomicU64>,

    /// Notifications accepted by the notifier
    notifications_sent_total: Arc<AtomicU64>,

    /// Notifier failures, timeouts included
    notifier_failures_total: Arc<AtomicU64>,

    /// Requests that ended in an internal error
    internal_errors_total: Arc<AtomicU64>,

    /// Number of notifier calls timed
    notifier_calls_total: Arc<AtomicU64>,

    /// Total duration of all notifier calls in milliseconds
    notifier_duration_total_ms: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            requests_total: Arc::new(AtomicU64::new(0)),
            admission_denied_total: Arc::new(AtomicU64::new(0)),
            invalid_input_total: Arc::new(AtomicU64::new(0)),
            out_of_region_total: Arc::new(AtomicU64::new(0)),
            notifications_sent_total: Arc::new(AtomicU64::new(0)),
            notifier_failures_total: Arc::new(AtomicU64::new(0)),
            internal_errors_total: Arc::new(AtomicU64::new(0)),
            notifier_calls_total: Arc::new(AtomicU64::new(0)),
            notifier_duration_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_admission_denied(&self) {
        self.admission_denied_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_input(&self) {
        self.invalid_input_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_out_of_region(&self) {
        self.out_of_region_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification_sent(&self) {
        self.notifications_sent_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notifier_failure(&self) {
        self.notifier_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_internal_error(&self) {
        self.internal_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the duration of one notifier call.
    pub fn record_notifier_call(&self, duration: Duration) {
        self.notifier_calls_total.fetch_add(1, Ordering::Relaxed);
        self.notifier_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn admission_denied_total(&self) -> u64 {
        self.admission_denied_total.load(Ordering::Relaxed)
    }

    pub fn invalid_input_total(&self) -> u64 {
        self.invalid_input_total.load(Ordering::Relaxed)
    }

    pub fn out_of_region_total(&self) -> u64 {
        self.out_of_region_total.load(Ordering::Relaxed)
    }

    pub fn notifications_sent_total(&self) -> u64 {
        self.notifications_sent_total.load(Ordering::Relaxed)
    }

    pub fn notifier_failures_total(&self) -> u64 {
        self.notifier_failures_total.load(Ordering::Relaxed)
    }

    pub fn internal_errors_total(&self) -> u64 {
        self.internal_errors_total.load(Ordering::Relaxed)
    }

    pub fn notifier_calls_total(&self) -> u64 {
        self.notifier_calls_total.load(Ordering::Relaxed)
    }

    pub fn notifier_duration_total_ms(&self) -> u64 {
        self.notifier_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average notifier call duration in milliseconds.
    pub fn notifier_duration_avg_ms(&self) -> f64 {
        let total = self.notifier_duration_total_ms.load(Ordering::Relaxed);
        let count = self.notifier_calls_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        for counter in [
            &self.requests_total,
            &self.admission_denied_total,
            &self.invalid_input_total,
            &self.out_of_region_total,
            &self.notifications_sent_total,
            &self.notifier_failures_total,
            &self.internal_errors_total,
            &self.notifier_calls_total,
            &self.notifier_duration_total_ms,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            requests_total: self.requests_total(),
            admission_denied_total: self.admission_denied_total(),
            invalid_input_total: self.invalid_input_total(),
            out_of_region_total: self.out_of_region_total(),
            notifications_sent_total: self.notifications_sent_total(),
            notifier_failures_total: self.notifier_failures_total(),
            internal_errors_total: self.internal_errors_total(),
            notifier_duration_avg_ms: self.notifier_duration_avg_ms(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub requests_total: u64,
    pub admission_denied_total: u64,
    pub invalid_input_total: u64,
    pub out_of_region_total: u64,
    pub notifications_sent_total: u64,
    pub notifier_failures_total: u64,
    pub internal_errors_total: u64,
    pub notifier_duration_avg_ms: f64,
}

/// Helper for timing notifier calls.
pub struct NotifierTimer {
    start: Instant,
    metrics: Metrics,
}

impl NotifierTimer {
    /// Start timing a notifier call.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record a successful send.
    pub fn complete(self) {
        self.metrics.record_notifier_call(self.start.elapsed());
        self.metrics.record_notification_sent();
    }

    /// Complete the timing and record a failed send.
    pub fn complete_with_error(self) {
        self.metrics.record_notifier_call(self.start.elapsed());
        self.metrics.record_notifier_failure();
    }
}
