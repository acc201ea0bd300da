//! Console email provider for development.

use crate::error::Result;
use crate::message::{DeliveryReceipt, EmailBody, OutboundEmail};
use crate::providers::EmailProvider;
use async_trait::async_trait;
use tracing::info;

/// Console email provider.
///
/// Logs emails instead of sending them, so the reservation form can be
/// exercised locally without provider credentials. Every send succeeds.
#[derive(Clone, Debug, Default)]
pub struct ConsoleEmailProvider;

impl ConsoleEmailProvider {
    /// Create a new console email provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailProvider for ConsoleEmailProvider {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt> {
        match &email.body {
            EmailBody::Templated {
                template_id,
                params,
            } => {
                info!(
                    to = %email.recipient_list(),
                    from = %email.sender,
                    template_id = template_id,
                    params = %serde_json::Value::Object(params.clone()),
                    "📧 Templated email (Development Mode, not sent)"
                );
            }
            EmailBody::Inline { subject, text, .. } => {
                info!(
                    "\n\n\
                    ┌────────────────────────────────────────────────────────────────┐\n\
                    │                  Email (Development Mode)                      │\n\
                    ├────────────────────────────────────────────────────────────────┤\n\
                    │ To: {:<58} │\n\
                    │ Subject: {:<53} │\n\
                    └────────────────────────────────────────────────────────────────┘\n\
                    {}\n",
                    email.recipient_list(),
                    subject,
                    text
                );
            }
        }

        Ok(DeliveryReceipt::default())
    }
}
