//! Business lookup.

use crate::database_error;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use supperclub_core::{Business, BusinessDirectory, BusinessId, StoreError, StoreResult};
use uuid::Uuid;

/// `PostgreSQL` business directory.
#[derive(Clone, Debug)]
pub struct PostgresBusinessDirectory {
    pool: PgPool,
}

impl PostgresBusinessDirectory {
    /// Create a directory over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessDirectory for PostgresBusinessDirectory {
    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Business>> {
        let row = sqlx::query("SELECT id, slug, name FROM businesses WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let decode = |e: sqlx::Error| StoreError::Decode {
            entity: "business",
            reason: e.to_string(),
        };

        Ok(Some(Business {
            id: BusinessId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode)?),
            slug: row.try_get("slug").map_err(decode)?,
            name: row.try_get("name").map_err(decode)?,
        }))
    }
}
