use async_trait::async_trait;
use booking_mcp_server::domain::EmailAddress;
use booking_mcp_server::error::{NotifierError, NotifierResult};
use booking_mcp_server::notifier::{MessageId, Notifier};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A message the mock was asked to send.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Mock notifier for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    fail_with_status: Option<u16>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with an API error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    /// Every send sleeps for `delay` before succeeding.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(
        &self,
        from: &EmailAddress,
        to: &[EmailAddress],
        subject: &str,
        body: &str,
    ) -> NotifierResult<MessageId> {
        let count = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(SentMessage {
                from: from.to_string(),
                to: to.iter().map(|e| e.to_string()).collect(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
            sent.len()
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = self.fail_with_status {
            return Err(NotifierError::ApiError {
                status,
                message: "internal relay failure at 10.0.0.7".to_string(),
            });
        }

        Ok(MessageId(format!("msg_{}", count)))
    }
}
