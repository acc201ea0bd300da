//! Domain types for the Supper Club reservation service.
//!
//! Identifiers, the business (tenant) record, reservations and the
//! per-business reservation settings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a business (tenant)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessId(Uuid);

impl BusinessId {
    /// Creates a new random `BusinessId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `BusinessId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BusinessId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a reservation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Creates a new random `ReservationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `ReservationId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a live-music event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Business
// ============================================================================

/// A tenant (restaurant) identified by a unique slug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    /// Business identifier
    pub id: BusinessId,
    /// Unique slug, e.g. `supper-club`
    pub slug: String,
    /// Display name
    pub name: String,
}

/// Per-business reservation configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSettings {
    /// Owning business
    pub business_id: BusinessId,
    /// Addresses notified when a reservation request arrives
    pub notification_emails: Vec<String>,
}

impl ReservationSettings {
    /// Recipient addresses with blank entries removed.
    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        self.notification_emails
            .iter()
            .map(|email| email.trim())
            .filter(|email| !email.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// ============================================================================
// Reservations
// ============================================================================

/// Reservation lifecycle status.
///
/// The intake flow only ever writes [`ReservationStatus::Pending`]; staff
/// tooling moves reservations to the other states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Requested, not yet acknowledged by staff
    Pending,
    /// Confirmed by staff
    Confirmed,
    /// Cancelled by staff or customer
    Cancelled,
}

impl ReservationStatus {
    /// Database/wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse the database representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seating the customer asked for.
///
/// Anything that is not brunch or dinner is a jazz night booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Weekend brunch
    Brunch,
    /// Dinner service
    Dinner,
    /// Live jazz night
    Jazz,
}

impl MealType {
    /// Map a submitted meal type (case-insensitive) to a seating.
    ///
    /// # Examples
    ///
    /// ```
    /// use supperclub_core::MealType;
    ///
    /// assert_eq!(MealType::from_submitted("brunch"), MealType::Brunch);
    /// assert_eq!(MealType::from_submitted("Dinner"), MealType::Dinner);
    /// assert_eq!(MealType::from_submitted("jazz"), MealType::Jazz);
    /// assert_eq!(MealType::from_submitted("late-night"), MealType::Jazz);
    /// ```
    #[must_use]
    pub fn from_submitted(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "brunch" => Self::Brunch,
            "dinner" => Self::Dinner,
            _ => Self::Jazz,
        }
    }

    /// Human-readable label used in notifications.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Brunch => "Brunch",
            Self::Dinner => "Dinner",
            Self::Jazz => "Jazz",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reservation row to insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    /// Owning business
    pub business_id: BusinessId,
    /// Customer display name
    pub customer_name: String,
    /// Customer email
    pub customer_email: String,
    /// Customer phone
    pub customer_phone: String,
    /// Requested date
    pub reservation_date: NaiveDate,
    /// Requested time, as submitted (e.g. `19:00`)
    pub reservation_time: String,
    /// Number of guests (at least 1)
    pub party_size: i32,
    /// Free-text notes
    pub special_requests: Option<String>,
    /// Initial status
    pub status: ReservationStatus,
}

/// A stored reservation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reservation identifier
    pub id: ReservationId,
    /// Owning business
    pub business_id: BusinessId,
    /// Customer display name
    pub customer_name: String,
    /// Customer email
    pub customer_email: String,
    /// Customer phone
    pub customer_phone: String,
    /// Requested date
    pub reservation_date: NaiveDate,
    /// Requested time
    pub reservation_time: String,
    /// Number of guests
    pub party_size: i32,
    /// Free-text notes
    pub special_requests: Option<String>,
    /// Lifecycle status
    pub status: ReservationStatus,
    /// Insert timestamp
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Materialize a stored reservation from an insert request.
    #[must_use]
    pub fn from_new(id: ReservationId, new: NewReservation, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            business_id: new.business_id,
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            customer_phone: new.customer_phone,
            reservation_date: new.reservation_date,
            reservation_time: new.reservation_time,
            party_size: new.party_size,
            special_requests: new.special_requests,
            status: new.status,
            created_at,
        }
    }
}
