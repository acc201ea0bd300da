//! Repository wiring.
//!
//! With a database URL every repository is backed by Postgres. Without one
//! the service still accepts reservations: every repository reports
//! [`StoreError::Unavailable`], so the business stays unresolved, nothing is
//! recorded and the event calendar is empty.

use crate::config::DatabaseConfig;
use async_trait::async_trait;
use std::sync::Arc;
use supperclub_core::{
    Business, BusinessDirectory, BusinessId, EventCalendar, LiveEvent, NewReservation,
    ReservationId, ReservationRepository, ReservationSettings, SettingsRepository, StoreError,
    StoreResult,
};
use supperclub_postgres::{
    PgPool, PoolSettings, PostgresBusinessDirectory, PostgresEventCalendar,
    PostgresReservationRepository, PostgresSettingsRepository,
};

/// The four repositories the service uses.
#[derive(Clone)]
pub struct Stores {
    /// Tenant lookup
    pub businesses: Arc<dyn BusinessDirectory>,
    /// Reservation inserts
    pub reservations: Arc<dyn ReservationRepository>,
    /// Recipient settings
    pub settings: Arc<dyn SettingsRepository>,
    /// Event calendar
    pub events: Arc<dyn EventCalendar>,
}

impl Stores {
    /// Postgres-backed repositories over one lazily connected pool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the URL cannot be parsed.
    pub fn postgres(config: &DatabaseConfig) -> StoreResult<(Self, PgPool)> {
        let pool = supperclub_postgres::connect_lazy(
            &config.url,
            &PoolSettings {
                max_connections: config.max_connections,
                connect_timeout: config.connect_timeout,
            },
        )?;

        let stores = Self {
            businesses: Arc::new(PostgresBusinessDirectory::new(pool.clone())),
            reservations: Arc::new(PostgresReservationRepository::new(pool.clone())),
            settings: Arc::new(PostgresSettingsRepository::new(pool.clone())),
            events: Arc::new(PostgresEventCalendar::new(pool.clone())),
        };
        Ok((stores, pool))
    }

    /// Repositories for a process running without a database.
    #[must_use]
    pub fn offline() -> Self {
        let offline = Arc::new(OfflineStore);
        Self {
            businesses: offline.clone(),
            reservations: offline.clone(),
            settings: offline.clone(),
            events: offline,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

/// Every operation fails with [`StoreError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineStore;

#[async_trait]
impl BusinessDirectory for OfflineStore {
    async fn find_by_slug(&self, _slug: &str) -> StoreResult<Option<Business>> {
        Err(StoreError::Unavailable)
    }
}

#[async_trait]
impl ReservationRepository for OfflineStore {
    async fn insert(&self, _reservation: NewReservation) -> StoreResult<ReservationId> {
        Err(StoreError::Unavailable)
    }
}

#[async_trait]
impl SettingsRepository for OfflineStore {
    async fn find_for_business(
        &self,
        _business_id: BusinessId,
    ) -> StoreResult<Option<ReservationSettings>> {
        Err(StoreError::Unavailable)
    }
}

#[async_trait]
impl EventCalendar for OfflineStore {
    async fn list_published(&self, _business_id: BusinessId) -> StoreResult<Vec<LiveEvent>> {
        Err(StoreError::Unavailable)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_store_reports_unavailable() {
        let stores = Stores::offline();

        assert_eq!(
            stores.businesses.find_by_slug("supper-club").await,
            Err(StoreError::Unavailable)
        );
        assert_eq!(
            stores.events.list_published(BusinessId::new()).await,
            Err(StoreError::Unavailable)
        );
    }

    #[tokio::test]
    async fn test_postgres_rejects_malformed_url() {
        let config = DatabaseConfig {
            url: "not a url".to_string(),
            max_connections: 1,
            connect_timeout: std::time::Duration::from_secs(1),
        };

        assert!(matches!(Stores::postgres(&config), Err(StoreError::Database(_))));
    }
}
