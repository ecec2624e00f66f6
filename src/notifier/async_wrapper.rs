//! Async notifier interface and its mail-API implementation.
//!
//! `MailNotifier` wraps the synchronous [`MailClient`] and runs each send on
//! tokio's blocking pool so the async runtime is never blocked.

use super::{MailClient, MessageId, OutboundEmail};
use crate::domain::EmailAddress;
use crate::error::{NotifierError, NotifierResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Delivers an accepted booking to whoever handles it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        from: &EmailAddress,
        to: &[EmailAddress],
        subject: &str,
        body: &str,
    ) -> NotifierResult<MessageId>;
}

/// Notifier backed by the mail API.
#[derive(Clone)]
pub struct MailNotifier {
    client: Arc<MailClient>,
}

impl MailNotifier {
    pub fn new(client: MailClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn send(
        &self,
        from: &EmailAddress,
        to: &[EmailAddress],
        subject: &str,
        body: &str,
    ) -> NotifierResult<MessageId> {
        let client = self.client.clone();
        let email = OutboundEmail {
            from: from.clone(),
            to: to.to_vec(),
            subject: subject.to_string(),
            text: body.to_string(),
        };

        tokio::task::spawn_blocking(move || client.send(&email))
            .await
            .map_err(|e| NotifierError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mail_notifier_creation() {
        let client = MailClient::with_base_url(
            "https://mail.test.com/emails".to_string(),
            "test_key".to_string(),
        );
        let notifier = MailNotifier::new(client);

        // Should be able to clone and use as a trait object
        let _shared: Arc<dyn Notifier> = Arc::new(notifier.clone());
    }
}
