//! In-memory repositories for fast, deterministic tests.
//!
//! Each double implements the matching trait from `supperclub-core`, keeps
//! its data behind `Arc<RwLock<..>>` so clones share state, and can be
//! switched into a failing mode to exercise error paths.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use supperclub_core::{
    Business, BusinessDirectory, BusinessId, EventCalendar, LiveEvent, NewReservation,
    Reservation, ReservationId, ReservationRepository, ReservationSettings, SettingsRepository,
    StoreError, StoreResult,
};

fn injected_failure() -> StoreError {
    StoreError::Database("injected failure".to_string())
}

/// In-memory business directory.
///
/// ```
/// use supperclub_testing::{fixtures, InMemoryBusinessDirectory};
/// use supperclub_core::BusinessDirectory;
///
/// # async fn example() {
/// let directory = InMemoryBusinessDirectory::with_business(fixtures::business("supper-club"));
/// assert!(directory.find_by_slug("supper-club").await.unwrap().is_some());
/// assert_eq!(directory.lookups(), 1);
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryBusinessDirectory {
    businesses: Arc<RwLock<HashMap<String, Business>>>,
    failing: Arc<AtomicBool>,
    misses_remaining: Arc<AtomicUsize>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryBusinessDirectory {
    /// Empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding one business.
    #[must_use]
    pub fn with_business(business: Business) -> Self {
        let directory = Self::new();
        directory.insert(business);
        directory
    }

    /// Add or replace a business.
    pub fn insert(&self, business: Business) {
        self.businesses
            .write()
            .unwrap()
            .insert(business.slug.clone(), business);
    }

    /// Make every lookup fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The next `count` lookups report "not found" even if the business exists.
    pub fn miss_next(&self, count: usize) {
        self.misses_remaining.store(count, Ordering::SeqCst);
    }

    /// Lookups performed so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BusinessDirectory for InMemoryBusinessDirectory {
    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Business>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }

        let missed = self
            .misses_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if missed {
            return Ok(None);
        }

        Ok(self.businesses.read().unwrap().get(slug).cloned())
    }
}

/// In-memory reservation repository.
#[derive(Clone, Debug, Default)]
pub struct InMemoryReservationRepository {
    reservations: Arc<RwLock<Vec<Reservation>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryReservationRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every stored reservation, in insert order.
    #[must_use]
    pub fn all(&self) -> Vec<Reservation> {
        self.reservations.read().unwrap().clone()
    }

    /// Number of stored reservations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reservations.read().unwrap().len()
    }

    /// Check if the repository is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reservations.read().unwrap().is_empty()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn insert(&self, reservation: NewReservation) -> StoreResult<ReservationId> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }

        let id = ReservationId::new();
        self.reservations
            .write()
            .unwrap()
            .push(Reservation::from_new(id, reservation, Utc::now()));
        Ok(id)
    }
}

/// In-memory settings repository.
#[derive(Clone, Debug, Default)]
pub struct InMemorySettingsRepository {
    settings: Arc<RwLock<HashMap<BusinessId, ReservationSettings>>>,
    failing: Arc<AtomicBool>,
}

impl InMemorySettingsRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the recipient list for a business.
    pub fn set_recipients<I, S>(&self, business_id: BusinessId, emails: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.write().unwrap().insert(
            business_id,
            ReservationSettings {
                business_id,
                notification_emails: emails.into_iter().map(Into::into).collect(),
            },
        );
    }

    /// Make every lookup fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn find_for_business(
        &self,
        business_id: BusinessId,
    ) -> StoreResult<Option<ReservationSettings>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }

        Ok(self.settings.read().unwrap().get(&business_id).cloned())
    }
}

/// In-memory event calendar.
///
/// Holds every event, published or not; [`EventCalendar::list_published`]
/// filters and orders like the database query does.
#[derive(Clone, Debug, Default)]
pub struct InMemoryEventCalendar {
    events: Arc<RwLock<Vec<LiveEvent>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryEventCalendar {
    /// Empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event.
    pub fn insert(&self, event: LiveEvent) {
        self.events.write().unwrap().push(event);
    }

    /// Make every query fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventCalendar for InMemoryEventCalendar {
    async fn list_published(&self, business_id: BusinessId) -> StoreResult<Vec<LiveEvent>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }

        let mut events: Vec<_> = self
            .events
            .read()
            .unwrap()
            .iter()
            .filter(|event| event.business_id == business_id && event.published)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.starts_at);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_directory_miss_next_then_hit() {
        let business = fixtures::business("supper-club");
        let directory = InMemoryBusinessDirectory::with_business(business.clone());
        directory.miss_next(1);

        assert_eq!(directory.find_by_slug("supper-club").await, Ok(None));
        assert_eq!(directory.find_by_slug("supper-club").await, Ok(Some(business)));
        assert_eq!(directory.lookups(), 2);
    }

    #[tokio::test]
    async fn test_failing_repository() {
        let repository = InMemoryReservationRepository::new();
        repository.set_failing(true);

        let business_id = BusinessId::new();
        let result = repository
            .insert(fixtures::valid_reservation().to_new_reservation(business_id))
            .await;

        assert!(result.is_err());
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_calendar_filters_and_orders() {
        let business_id = BusinessId::new();
        let calendar = InMemoryEventCalendar::new();
        let now = Utc::now();

        calendar.insert(fixtures::event(business_id, "Second", now + chrono::Duration::days(2)));
        calendar.insert(fixtures::event(business_id, "First", now + chrono::Duration::days(1)));
        let mut draft = fixtures::event(business_id, "Draft", now);
        draft.published = false;
        calendar.insert(draft);
        calendar.insert(fixtures::event(BusinessId::new(), "Elsewhere", now));

        let titles: Vec<_> = calendar
            .list_published(business_id)
            .await
            .unwrap()
            .into_iter()
            .map(|event| event.title)
            .collect();

        assert_eq!(titles, vec!["First".to_string(), "Second".to_string()]);
    }
}
