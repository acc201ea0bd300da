//! Live-music event calendar.

use crate::database_error;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use supperclub_core::{BusinessId, EventCalendar, EventId, LiveEvent, StoreError, StoreResult};
use uuid::Uuid;

/// `PostgreSQL` event calendar.
#[derive(Clone, Debug)]
pub struct PostgresEventCalendar {
    pool: PgPool,
}

impl PostgresEventCalendar {
    /// Create a calendar over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: &PgRow) -> StoreResult<LiveEvent> {
        let decode = |e: sqlx::Error| StoreError::Decode {
            entity: "event",
            reason: e.to_string(),
        };

        Ok(LiveEvent {
            id: EventId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode)?),
            business_id: BusinessId::from_uuid(
                row.try_get::<Uuid, _>("business_id").map_err(decode)?,
            ),
            title: row.try_get("title").map_err(decode)?,
            description: row.try_get("description").map_err(decode)?,
            starts_at: row.try_get("starts_at").map_err(decode)?,
            ends_at: row.try_get("ends_at").map_err(decode)?,
            published: row.try_get("published").map_err(decode)?,
        })
    }
}

#[async_trait]
impl EventCalendar for PostgresEventCalendar {
    async fn list_published(&self, business_id: BusinessId) -> StoreResult<Vec<LiveEvent>> {
        let rows = sqlx::query(
            r"
            SELECT id, business_id, title, description, starts_at, ends_at, published
            FROM events
            WHERE business_id = $1 AND published
            ORDER BY starts_at ASC
            ",
        )
        .bind(business_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_event).collect()
    }
}
