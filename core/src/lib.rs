//! # Supper Club Core
//!
//! Domain types and pure logic for the Supper Club reservation service.
//!
//! This crate has no I/O of its own. It provides:
//!
//! - **Types**: businesses, reservations, reservation settings, live-music events
//! - **Validation**: the reservation form rules, as a pure function of the
//!   submitted fields and today's date
//! - **Event status**: draft / scheduled / live / past, derived from timestamps
//! - **Stores**: the repository traits implemented by `supperclub-postgres`
//!   and by the in-memory doubles in `supperclub-testing`
//! - **Environment**: the `Clock` abstraction so "today" is injectable
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  supperclub-server (shell)   │  ← HTTP, config, orchestration
//! ├──────────────────────────────┤
//! │  supperclub-core             │  ← validation, types, traits
//! └──────────────────────────────┘
//!          ▲              ▲
//!  supperclub-postgres  supperclub-testing
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod environment;
pub mod error;
pub mod events;
pub mod stores;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};
pub use environment::{Clock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use events::{EventStatus, LiveEvent};
pub use stores::{BusinessDirectory, EventCalendar, ReservationRepository, SettingsRepository};
pub use types::{
    Business, BusinessId, EventId, MealType, NewReservation, Reservation, ReservationId,
    ReservationSettings, ReservationStatus,
};
pub use validation::{ReservationForm, ValidReservation, ValidationError};
