//! Property-based testing utilities using proptest.
//!
//! Strategies for reservation forms, valid relative to a given "today".

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use supperclub_core::ReservationForm;

/// Meal types as a customer might type them.
pub fn meal_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("brunch".to_string()),
        Just("Dinner".to_string()),
        Just("JAZZ".to_string()),
        "[a-z]{1,12}",
    ]
}

/// Addresses of the form `local@domain.tld`.
pub fn email() -> impl Strategy<Value = String> {
    ("[a-z]{1,8}([._+-][a-z]{1,8})?", "[a-z]{1,10}", "[a-z]{2,4}")
        .prop_map(|(local, domain, tld)| format!("{local}@{domain}.{tld}"))
}

/// Forms that pass validation on `today`.
pub fn valid_form(today: NaiveDate) -> impl Strategy<Value = ReservationForm> {
    (
        1..=40i32,
        meal_type(),
        0..=365i64,
        "(1[0-9]|2[0-3]):[0-5][0-9]",
        email(),
        "[0-9]{3}-[0-9]{4}",
        proptest::option::of("[A-Z][a-z]{1,10}"),
    )
        .prop_map(move |(party_size, meal_type, days_ahead, time, email, phone, name)| {
            ReservationForm {
                party_size: Some(party_size.to_string()),
                meal_type: Some(meal_type),
                date: Some((today + Duration::days(days_ahead)).format("%Y-%m-%d").to_string()),
                time: Some(time),
                email: Some(email),
                phone: Some(phone),
                name,
                special_requests: None,
            }
        })
}
