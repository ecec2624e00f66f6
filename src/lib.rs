//! Booking MCP Server - a Model Context Protocol server for cleaning-service booking intake.
//!
//! This library validates booking requests (name, phone, address), decides
//! whether the address is inside the serviced region, and forwards accepted
//! requests to the business through a mail API.
//!
//! # Architecture
//!
//! - **domain**: Value objects (phone numbers, emails, raw field input)
//! - **validation**: Sanitizer, field validators and the region matcher
//! - **rate_limit**: Per-client sliding-window admission control
//! - **notifier**: Mail API client and the async `Notifier` interface
//! - **dispatcher**: The admission pipeline tying everything together
//! - **server**: MCP protocol server exposing the `request_cleaning` tool
//! - **config**, **error**, **metrics**: Ambient plumbing

pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod notifier;
pub mod rate_limit;
pub mod server;
pub mod validation;

pub use config::Config;
pub use dispatcher::{DispatchResponse, DispatchStage, DispatcherSettings, RequestDispatcher};
pub use domain::{BookingRequest, EmailAddress, FieldInput, PhoneNumber};
pub use error::{BookingError, ConfigError, NotifierError};
pub use metrics::{Metrics, MetricsSummary};
pub use notifier::{MailClient, MailNotifier, MessageId, Notifier};
pub use rate_limit::RateLimiter;
pub use server::BookingMcpServer;
pub use validation::{RegionMatcher, ValidationOutcome};
