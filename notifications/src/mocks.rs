//! Mock email provider for testing.
//!
//! Records every message instead of sending it.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

use crate::error::{EmailError, Result};
use crate::message::{DeliveryReceipt, OutboundEmail};
use crate::providers::EmailProvider;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock email provider.
///
/// Clones share the same outbox, so a test can keep one handle and give
/// another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockEmailProvider {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    fail_all: bool,
    fail_for: Option<String>,
    delay: Option<Duration>,
}

impl MockEmailProvider {
    /// Create a mock that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with a provider error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Sends addressed to `email` fail; others succeed.
    #[must_use]
    pub fn failing_for(mut self, email: impl Into<String>) -> Self {
        self.fail_for = Some(email.into());
        self
    }

    /// Wait this long before completing each send.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every message that was sent successfully.
    #[must_use]
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of messages sent successfully.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Messages with `email` among their recipients.
    #[must_use]
    pub fn sent_to(&self, email: &str) -> Vec<OutboundEmail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|message| message.to.iter().any(|mailbox| mailbox.email == email))
            .cloned()
            .collect()
    }

    fn should_fail(&self, email: &OutboundEmail) -> bool {
        self.fail_all
            || self
                .fail_for
                .as_deref()
                .is_some_and(|target| email.to.iter().any(|mailbox| mailbox.email == target))
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail(email) {
            return Err(EmailError::Provider {
                status: 500,
                body: r#"{"code":"internal_error","message":"mock failure"}"#.to_string(),
            });
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(DeliveryReceipt {
            message_id: Some(format!("<mock-{}@example.com>", sent.len())),
        })
    }
}
