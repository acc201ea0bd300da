//! Reservation form validation.
//!
//! [`ReservationForm::validate`] is a pure function of the submitted fields
//! and today's date. Rules are checked in order and the first failure wins:
//!
//! 1. every required field is present and non-blank
//! 2. the email has a `local@domain.tld` shape
//! 3. the party size is an integer of at least 1
//! 4. the date is a `YYYY-MM-DD` calendar date
//! 5. the date is not before today

use crate::types::{BusinessId, MealType, NewReservation, ReservationStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw reservation form as submitted by the website.
///
/// Every field is optional at this stage so that a missing field is reported
/// as a validation failure rather than a deserialization failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationForm {
    /// Number of guests, as a string
    pub party_size: Option<String>,
    /// `brunch`, `dinner` or anything else (jazz)
    pub meal_type: Option<String>,
    /// Requested date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Requested time, e.g. `19:00`
    pub time: Option<String>,
    /// Customer email
    pub email: Option<String>,
    /// Customer phone
    pub phone: Option<String>,
    /// Customer name (derived from the email when absent)
    pub name: Option<String>,
    /// Free-text notes
    pub special_requests: Option<String>,
}

/// Why a reservation form was rejected.
///
/// The `Display` text is the message returned to the caller.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("All fields are required")]
    MissingFields,

    /// Email does not look like `local@domain.tld`.
    #[error("Invalid email format")]
    InvalidEmail,

    /// Party size is not an integer of at least 1.
    #[error("Invalid party size")]
    InvalidPartySize,

    /// Date is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid reservation date")]
    InvalidDate,

    /// Date is before today.
    #[error("Reservation date cannot be in the past")]
    DateInPast,
}

impl ValidationError {
    /// Short machine-readable reason, used as a metrics label.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPartySize => "invalid_party_size",
            Self::InvalidDate => "invalid_date",
            Self::DateInPast => "date_in_past",
        }
    }
}

/// A reservation request that passed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidReservation {
    /// Number of guests (at least 1)
    pub party_size: i32,
    /// Seating
    pub meal_type: MealType,
    /// Requested date
    pub date: NaiveDate,
    /// Requested time, as submitted
    pub time: String,
    /// Customer email
    pub email: String,
    /// Customer phone
    pub phone: String,
    /// Customer display name
    pub customer_name: String,
    /// Free-text notes, if any
    pub special_requests: Option<String>,
}

impl ReservationForm {
    /// Validate the form against today's date.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] in rule order.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidReservation, ValidationError> {
        let (Some(party_size), Some(meal_type), Some(date), Some(time), Some(email), Some(phone)) = (
            present(self.party_size.as_deref()),
            present(self.meal_type.as_deref()),
            present(self.date.as_deref()),
            present(self.time.as_deref()),
            present(self.email.as_deref()),
            present(self.phone.as_deref()),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        let party_size = parse_party_size(party_size).ok_or(ValidationError::InvalidPartySize)?;

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate)?;
        if date < today {
            return Err(ValidationError::DateInPast);
        }

        let customer_name = present(self.name.as_deref())
            .map_or_else(|| display_name_from_email(email), str::to_string);

        Ok(ValidReservation {
            party_size,
            meal_type: MealType::from_submitted(meal_type),
            date,
            time: time.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            customer_name,
            special_requests: present(self.special_requests.as_deref()).map(str::to_string),
        })
    }
}

impl ValidReservation {
    /// Build the `pending` row for this request.
    ///
    /// The meal label leads the notes column so staff see the seating
    /// alongside whatever the customer wrote.
    #[must_use]
    pub fn to_new_reservation(&self, business_id: BusinessId) -> NewReservation {
        let notes = match &self.special_requests {
            Some(notes) => format!("Meal: {}. {notes}", self.meal_type.label()),
            None => format!("Meal: {}", self.meal_type.label()),
        };

        NewReservation {
            business_id,
            customer_name: self.customer_name.clone(),
            customer_email: self.email.clone(),
            customer_phone: self.phone.clone(),
            reservation_date: self.date,
            reservation_time: self.time.clone(),
            party_size: self.party_size,
            special_requests: Some(notes),
            status: ReservationStatus::Pending,
        }
    }

    /// "1 guest", "4 guests".
    #[must_use]
    pub fn guests_phrase(&self) -> String {
        if self.party_size == 1 {
            "1 guest".to_string()
        } else {
            format!("{} guests", self.party_size)
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_party_size(value: &str) -> Option<i32> {
    value.parse::<i32>().ok().filter(|size| *size >= 1)
}

/// Check the conservative `local@domain.tld` shape.
///
/// - no whitespace anywhere
/// - exactly one `@`, with a non-empty local part
/// - the domain contains a `.` with at least one character on each side
///
/// # Examples
///
/// ```
/// use supperclub_core::validation::is_valid_email;
///
/// assert!(is_valid_email("a.b@x.com"));
/// assert!(is_valid_email("guest+jazz@mail.example.co.uk"));
/// assert!(!is_valid_email("guest@localhost"));
/// assert!(!is_valid_email("guest @example.com"));
/// assert!(!is_valid_email("@example.com"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

/// Derive a display name from the local part of an email.
///
/// Separators (`.`, `_`, `-`, `+`) become spaces and each word is
/// capitalized. A local part made only of separators is returned as is.
///
/// # Examples
///
/// ```
/// use supperclub_core::validation::display_name_from_email;
///
/// assert_eq!(display_name_from_email("a.b@x.com"), "A B");
/// assert_eq!(display_name_from_email("ella_fitzgerald@example.com"), "Ella Fitzgerald");
/// assert_eq!(display_name_from_email("miles-davis+jazz@example.com"), "Miles Davis Jazz");
/// assert_eq!(display_name_from_email("._@example.com"), "._");
/// ```
#[must_use]
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();

    let name = local
        .split(['.', '_', '-', '+'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        local.to_string()
    } else {
        name
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn valid_form() -> ReservationForm {
        ReservationForm {
            party_size: Some("2".to_string()),
            meal_type: Some("dinner".to_string()),
            date: Some("2999-01-01".to_string()),
            time: Some("19:00".to_string()),
            email: Some("a.b@x.com".to_string()),
            phone: Some("555-1234".to_string()),
            name: None,
            special_requests: None,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let valid = valid_form().validate(today());
        let Ok(valid) = valid else {
            panic!("expected valid form, got {valid:?}");
        };

        assert_eq!(valid.party_size, 2);
        assert_eq!(valid.meal_type, MealType::Dinner);
        assert_eq!(valid.date, NaiveDate::from_ymd_opt(2999, 1, 1).unwrap());
        assert_eq!(valid.time, "19:00");
        assert_eq!(valid.customer_name, "A B");
        assert_eq!(valid.guests_phrase(), "2 guests");
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        let clear: [fn(&mut ReservationForm); 6] = [
            |f| f.party_size = None,
            |f| f.meal_type = None,
            |f| f.date = None,
            |f| f.time = None,
            |f| f.email = None,
            |f| f.phone = Some("   ".to_string()),
        ];

        for clear_field in clear {
            let mut form = valid_form();
            clear_field(&mut form);
            assert_eq!(form.validate(today()), Err(ValidationError::MissingFields));
        }
    }

    #[test]
    fn test_missing_fields_checked_before_email() {
        let form = ReservationForm {
            email: Some("not-an-email".to_string()),
            ..ReservationForm::default()
        };
        assert_eq!(form.validate(today()), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_invalid_email_checked_before_party_size() {
        let form = ReservationForm {
            email: Some("nobody".to_string()),
            party_size: Some("abc".to_string()),
            ..valid_form()
        };
        assert_eq!(form.validate(today()), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_party_size_rules() {
        for bad in ["0", "-3", "abc", "2.5", "1e3"] {
            let form = ReservationForm {
                party_size: Some(bad.to_string()),
                ..valid_form()
            };
            assert_eq!(
                form.validate(today()),
                Err(ValidationError::InvalidPartySize),
                "party size {bad:?} should be rejected"
            );
        }

        for good in ["1", "8", "120"] {
            let form = ReservationForm {
                party_size: Some(good.to_string()),
                ..valid_form()
            };
            assert!(form.validate(today()).is_ok(), "party size {good:?} should pass");
        }
    }

    #[test]
    fn test_date_rules() {
        let yesterday = ReservationForm {
            date: Some("2026-10-17".to_string()),
            ..valid_form()
        };
        assert_eq!(yesterday.validate(today()), Err(ValidationError::DateInPast));

        let same_day = ReservationForm {
            date: Some("2026-10-18".to_string()),
            ..valid_form()
        };
        assert!(same_day.validate(today()).is_ok());

        let garbage = ReservationForm {
            date: Some("next friday".to_string()),
            ..valid_form()
        };
        assert_eq!(garbage.validate(today()), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_supplied_name_wins_over_derived() {
        let form = ReservationForm {
            name: Some("Nina Simone".to_string()),
            ..valid_form()
        };
        let valid = form.validate(today());
        assert_eq!(valid.map(|v| v.customer_name), Ok("Nina Simone".to_string()));
    }

    #[test]
    fn test_separator_only_local_part_keeps_a_name() {
        let form = ReservationForm {
            email: Some("._@x.com".to_string()),
            ..valid_form()
        };
        let valid = form.validate(today());
        assert_eq!(valid.map(|v| v.customer_name), Ok("._".to_string()));
    }

    #[test]
    fn test_to_new_reservation_is_pending() {
        let Ok(valid) = (ReservationForm {
            special_requests: Some("Window seat".to_string()),
            ..valid_form()
        })
        .validate(today()) else {
            panic!("form should validate");
        };

        let business_id = BusinessId::new();
        let row = valid.to_new_reservation(business_id);

        assert_eq!(row.business_id, business_id);
        assert_eq!(row.status, ReservationStatus::Pending);
        assert_eq!(row.party_size, 2);
        assert_eq!(row.special_requests.as_deref(), Some("Meal: Dinner. Window seat"));
    }

    #[test]
    fn test_single_guest_phrase() {
        let Ok(valid) = (ReservationForm {
            party_size: Some("1".to_string()),
            ..valid_form()
        })
        .validate(today()) else {
            panic!("form should validate");
        };
        assert_eq!(valid.guests_phrase(), "1 guest");
    }

    #[test]
    fn test_invalid_emails() {
        for bad in ["", "a@b", "a@.com", "a@com.", "a@@b.com", "a@b@c.com", "a b@c.com"] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_reason_labels_are_distinct() {
        let reasons = [
            ValidationError::MissingFields.reason(),
            ValidationError::InvalidEmail.reason(),
            ValidationError::InvalidPartySize.reason(),
            ValidationError::InvalidDate.reason(),
            ValidationError::DateInPast.reason(),
        ];
        let unique: std::collections::HashSet<_> = reasons.iter().collect();
        assert_eq!(unique.len(), reasons.len());
    }

    proptest! {
        #[test]
        fn prop_positive_party_sizes_pass(size in 1i32..10_000) {
            let form = ReservationForm {
                party_size: Some(size.to_string()),
                ..valid_form()
            };
            prop_assert_eq!(form.validate(today()).map(|v| v.party_size), Ok(size));
        }

        #[test]
        fn prop_non_positive_party_sizes_fail(size in -10_000i32..=0) {
            let form = ReservationForm {
                party_size: Some(size.to_string()),
                ..valid_form()
            };
            prop_assert_eq!(form.validate(today()), Err(ValidationError::InvalidPartySize));
        }

        #[test]
        fn prop_display_name_has_no_separators(local in "[a-z]{1,8}([._+-][a-z]{1,8}){0,3}") {
            let name = display_name_from_email(&format!("{local}@example.com"));
            prop_assert!(!name.contains(['.', '_', '-', '+']));
            prop_assert!(name.split(' ').all(|w| w.chars().next().is_some_and(char::is_uppercase)));
        }
    }
}
