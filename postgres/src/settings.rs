//! Reservation settings lookup.

use crate::database_error;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use supperclub_core::{
    BusinessId, ReservationSettings, SettingsRepository, StoreError, StoreResult,
};

/// `PostgreSQL` settings repository.
#[derive(Clone, Debug)]
pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    /// Create a repository over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn find_for_business(
        &self,
        business_id: BusinessId,
    ) -> StoreResult<Option<ReservationSettings>> {
        let row = sqlx::query(
            "SELECT notification_emails FROM reservation_settings WHERE business_id = $1",
        )
        .bind(business_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let notification_emails = row
            .try_get::<Option<Vec<String>>, _>("notification_emails")
            .map_err(|e| StoreError::Decode {
                entity: "reservation settings",
                reason: e.to_string(),
            })?
            .unwrap_or_default();

        Ok(Some(ReservationSettings {
            business_id,
            notification_emails,
        }))
    }
}
