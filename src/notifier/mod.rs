//! HTTP client for delivering booking notifications through a mail API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication and error
//! mapping for a JSON mail endpoint that accepts `{from, to, subject, text}` and
//! answers with `{"id": "..."}`.

mod async_wrapper;
mod message;

pub use async_wrapper::{MailNotifier, Notifier};
pub use message::BookingNotification;

use crate::config::Config;
use crate::domain::EmailAddress;
use crate::error::{NotifierError, NotifierResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Identifier the mail API assigned to an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request body sent to the mail API.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: EmailAddress,
    pub to: Vec<EmailAddress>,
    pub subject: String,
    pub text: String,
}

/// Response body from the mail API.
#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// HTTP client for the mail API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct MailClient {
    /// Full URL of the send endpoint
    api_url: String,

    /// API key for bearer authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl MailClient {
    /// Create a new MailClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.notifier_timeout_secs))
            .build();

        Self {
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            agent: Arc::new(agent),
        }
    }

    /// Create a MailClient with a custom endpoint (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(api_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            api_url,
            api_key,
            agent: Arc::new(agent),
        }
    }

    /// Send one email and return the id the API assigned to it.
    pub fn send(&self, email: &OutboundEmail) -> NotifierResult<MessageId> {
        let start = Instant::now();
        let body = serde_json::to_value(email)?;

        tracing::debug!(
            "POST {} ({} recipients)",
            self.api_url,
            email.to.len()
        );

        let result = self
            .agent
            .post(&self.api_url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        let response = match result {
            Ok(response) => {
                tracing::debug!(
                    duration_ms = start.elapsed().as_millis() as u64,
                    "POST {} - Success (status: {})",
                    self.api_url,
                    response.status()
                );
                response
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", self.api_url, e);
                return Err(e);
            }
        };

        let body = response
            .into_string()
            .map_err(|e| NotifierError::HttpError(e.to_string()))?;
        let parsed: SendResponse = serde_json::from_str(&body)?;

        Ok(MessageId(parsed.id))
    }

    /// Map a ureq error to a NotifierError.
    fn map_error(&self, error: ureq::Error) -> NotifierError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => NotifierError::Unauthorized,
                    429 => NotifierError::RateLimitExceeded,
                    _ => NotifierError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    NotifierError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    NotifierError::Timeout
                } else {
                    NotifierError::HttpError(transport.to_string())
                }
            }
        }
    }
}

impl fmt::Debug for MailClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
