//! Email providers.
//!
//! [`EmailProvider`] abstracts over the delivery service. Which
//! implementation a process uses is decided once at startup:
//!
//! | API key | Environment  | Provider                      |
//! |---------|--------------|-------------------------------|
//! | present | any          | [`BrevoEmailProvider`]        |
//! | absent  | development  | [`ConsoleEmailProvider`]      |
//! | absent  | anything else| [`UnconfiguredEmailProvider`] |

use crate::error::Result;
use crate::message::{DeliveryReceipt, OutboundEmail};
use async_trait::async_trait;

pub mod brevo;
pub mod console;
pub mod unconfigured;

pub use brevo::BrevoEmailProvider;
pub use console::ConsoleEmailProvider;
pub use unconfigured::UnconfiguredEmailProvider;

/// Email provider.
///
/// This trait abstracts over email delivery services
/// (Brevo, a console logger in development, test doubles).
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Provider name, for logs.
    fn name(&self) -> &'static str;

    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The provider is not configured
    /// - Network request fails
    /// - Email provider rejects the request
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt>;
}
