//! # Supper Club Notifications
//!
//! Transactional email for reservation requests.
//!
//! Every accepted reservation request produces two independent emails:
//!
//! - a **restaurant request** to the staff recipient list
//! - a **customer confirmation** to the person who booked
//!
//! ## Architecture
//!
//! ```text
//! ValidReservation ──► Notifier ──► render (template params | inline HTML/text)
//!                         │
//!                         ▼
//!                   EmailProvider
//!            ┌────────────┼──────────────┐
//!            ▼            ▼              ▼
//!     BrevoEmailProvider  Console   Unconfigured
//!      (HTTP API)        (dev only)  (no API key)
//! ```
//!
//! The provider and the body strategy of each email kind are chosen once at
//! startup. Sends never return errors to the caller: every outcome is folded
//! into a [`SendOutcome`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod error;
pub mod message;
pub mod notifier;
pub mod providers;
pub mod render;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use error::{EmailError, Result};
pub use message::{DeliveryReceipt, EmailBody, Mailbox, OutboundEmail};
pub use notifier::{
    BodyStrategy, NotificationKind, NotificationReport, Notifier, NotifierConfig,
    PendingNotifications, SendOutcome,
};
pub use providers::{
    BrevoEmailProvider, ConsoleEmailProvider, EmailProvider, UnconfiguredEmailProvider,
};
