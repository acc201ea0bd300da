//! Repository traits.
//!
//! These abstract over the relational datastore. The Postgres implementations
//! live in `supperclub-postgres`; in-memory doubles live in
//! `supperclub-testing`.
//!
//! Lookups that find nothing return `Ok(None)` (or an empty list). `Err` is
//! reserved for the datastore itself failing.

use crate::error::StoreResult;
use crate::events::LiveEvent;
use crate::types::{Business, BusinessId, NewReservation, ReservationId, ReservationSettings};
use async_trait::async_trait;

/// Read-only business lookup.
#[async_trait]
pub trait BusinessDirectory: Send + Sync {
    /// Find a business by its unique slug.
    ///
    /// # Errors
    ///
    /// Returns error if the datastore query fails.
    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Business>>;
}

/// Reservation persistence.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a reservation row and return its new identifier.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails.
    async fn insert(&self, reservation: NewReservation) -> StoreResult<ReservationId>;
}

/// Per-business reservation settings lookup.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load the settings row for a business, if one exists.
    ///
    /// # Errors
    ///
    /// Returns error if the datastore query fails.
    async fn find_for_business(
        &self,
        business_id: BusinessId,
    ) -> StoreResult<Option<ReservationSettings>>;
}

/// Live-music event calendar.
#[async_trait]
pub trait EventCalendar: Send + Sync {
    /// Published events for a business, ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns error if the datastore query fails.
    async fn list_published(&self, business_id: BusinessId) -> StoreResult<Vec<LiveEvent>>;
}
