//! Ready-made domain values.

#![allow(clippy::expect_used)] // Fixtures use hardcoded values that always parse

use chrono::{DateTime, NaiveDate, Utc};
use supperclub_core::{
    Business, BusinessId, EventId, LiveEvent, MealType, ReservationForm, ValidReservation,
};

/// Business with the given slug.
#[must_use]
pub fn business(slug: &str) -> Business {
    Business {
        id: BusinessId::new(),
        slug: slug.to_string(),
        name: "The Supper Club".to_string(),
    }
}

/// A complete form for two at dinner on 2999-01-01.
#[must_use]
pub fn reservation_form() -> ReservationForm {
    ReservationForm {
        party_size: Some("2".to_string()),
        meal_type: Some("dinner".to_string()),
        date: Some("2999-01-01".to_string()),
        time: Some("19:00".to_string()),
        email: Some("a.b@x.com".to_string()),
        phone: Some("555".to_string()),
        name: None,
        special_requests: None,
    }
}

/// What [`reservation_form`] validates to.
#[must_use]
pub fn valid_reservation() -> ValidReservation {
    ValidReservation {
        party_size: 2,
        meal_type: MealType::Dinner,
        date: NaiveDate::from_ymd_opt(2999, 1, 1).expect("valid date"),
        time: "19:00".to_string(),
        email: "a.b@x.com".to_string(),
        phone: "555".to_string(),
        customer_name: "A B".to_string(),
        special_requests: None,
    }
}

/// Published event without an explicit end.
#[must_use]
pub fn event(business_id: BusinessId, title: &str, starts_at: DateTime<Utc>) -> LiveEvent {
    LiveEvent {
        id: EventId::new(),
        business_id,
        title: title.to_string(),
        description: None,
        starts_at,
        ends_at: None,
        published: true,
    }
}
