//! Provider used when no API key is configured outside development.

use crate::error::{EmailError, Result};
use crate::message::{DeliveryReceipt, OutboundEmail};
use crate::providers::EmailProvider;
use async_trait::async_trait;

/// Fails every send with [`EmailError::MissingApiKey`].
#[derive(Clone, Debug, Default)]
pub struct UnconfiguredEmailProvider;

impl UnconfiguredEmailProvider {
    /// Create a new unconfigured provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailProvider for UnconfiguredEmailProvider {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn send(&self, _email: &OutboundEmail) -> Result<DeliveryReceipt> {
        Err(EmailError::MissingApiKey)
    }
}
