//! Live-music events and their derived status.
//!
//! Status is never stored. It is derived from the `published` flag and the
//! event's time window relative to "now":
//!
//! ```text
//! unpublished ──────────────────────────────► Draft
//! published:   now < starts_at ─────────────► Scheduled
//!              starts_at <= now < end ──────► Live
//!              end <= now ──────────────────► Past
//! ```
//!
//! `end` is `ends_at`, or `starts_at` plus a default duration when the event
//! has no explicit end.

use crate::types::{BusinessId, EventId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A live-music event on the calendar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveEvent {
    /// Event identifier
    pub id: EventId,
    /// Owning business
    pub business_id: BusinessId,
    /// Headline, e.g. "Thursday Night Trio"
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Start time
    pub starts_at: DateTime<Utc>,
    /// End time, if known
    pub ends_at: Option<DateTime<Utc>>,
    /// Visible on the public calendar
    pub published: bool,
}

/// Where an event sits relative to now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Not published yet
    Draft,
    /// Published and upcoming
    Scheduled,
    /// Happening now
    Live,
    /// Finished
    Past,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Past => "past",
        })
    }
}

impl LiveEvent {
    /// End of the event window.
    #[must_use]
    pub fn effective_end(&self, default_duration: Duration) -> DateTime<Utc> {
        self.ends_at.unwrap_or(self.starts_at + default_duration)
    }

    /// Derive the status at `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use supperclub_core::{BusinessId, EventId, EventStatus, LiveEvent};
    ///
    /// let starts_at = Utc.with_ymd_and_hms(2026, 10, 18, 20, 0, 0).unwrap();
    /// let event = LiveEvent {
    ///     id: EventId::new(),
    ///     business_id: BusinessId::new(),
    ///     title: "Sunday Standards".to_string(),
    ///     description: None,
    ///     starts_at,
    ///     ends_at: None,
    ///     published: true,
    /// };
    ///
    /// let three_hours = Duration::hours(3);
    /// assert_eq!(event.status_at(starts_at - Duration::minutes(1), three_hours), EventStatus::Scheduled);
    /// assert_eq!(event.status_at(starts_at, three_hours), EventStatus::Live);
    /// assert_eq!(event.status_at(starts_at + three_hours, three_hours), EventStatus::Past);
    /// ```
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>, default_duration: Duration) -> EventStatus {
        if !self.published {
            EventStatus::Draft
        } else if now < self.starts_at {
            EventStatus::Scheduled
        } else if now < self.effective_end(default_duration) {
            EventStatus::Live
        } else {
            EventStatus::Past
        }
    }
}
