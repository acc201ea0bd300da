//! # Supper Club Testing
//!
//! Test doubles and fixtures for the Supper Club reservation service.
//!
//! This crate provides:
//! - [`FixedClock`]: deterministic time
//! - In-memory repositories that can be told to fail or to miss
//! - [`MockEmailProvider`]: records outbound email instead of sending it
//! - Fixtures and proptest strategies for reservation forms
//!
//! ## Example
//!
//! ```ignore
//! use supperclub_testing::{fixtures, InMemoryBusinessDirectory, MockEmailProvider};
//!
//! #[tokio::test]
//! async fn test_reservation_flow() {
//!     let business = fixtures::business("supper-club");
//!     let directory = InMemoryBusinessDirectory::with_business(business);
//!     let email = MockEmailProvider::new();
//!     // hand the doubles to the code under test, then assert on them
//!     assert_eq!(email.sent_count(), 0);
//! }
//! ```

pub mod fixtures;
pub mod properties;
pub mod stores;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::{Arc, RwLock};
use supperclub_core::environment::Clock;

pub use stores::{
    InMemoryBusinessDirectory, InMemoryEventCalendar, InMemoryReservationRepository,
    InMemorySettingsRepository,
};
pub use supperclub_notifications::mocks::MockEmailProvider;

/// Mock implementations of Environment traits.
pub mod mocks {
    #![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
    #![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

    use super::{Arc, Clock, DateTime, Duration, NaiveDate, RwLock, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Returns the same time until moved with [`FixedClock::set`] or
    /// [`FixedClock::advance`]. Clones share the same time. "Today" is the
    /// UTC date of the fixed time, independent of the host time zone.
    ///
    /// # Example
    ///
    /// ```
    /// use supperclub_testing::mocks::FixedClock;
    /// use supperclub_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2);
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: Arc<RwLock<DateTime<Utc>>>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(RwLock::new(time)),
            }
        }

        /// Move the clock to `time`.
        pub fn set(&self, time: DateTime<Utc>) {
            *self.time.write().unwrap() = time;
        }

        /// Move the clock forward.
        pub fn advance(&self, by: Duration) {
            *self.time.write().unwrap() += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.read().unwrap()
        }

        fn today(&self) -> NaiveDate {
            self.now().date_naive()
        }
    }

    /// Create a default fixed clock for tests (2025-06-01 12:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; output goes through the test harness capture.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
