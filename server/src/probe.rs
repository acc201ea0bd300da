//! Readiness probe over the connection pool.

use async_trait::async_trait;
use supperclub_postgres::PgPool;
use supperclub_web::handlers::{DependencyStatus, ReadinessProbe};

/// Pings the database, if one is configured.
#[derive(Clone, Debug, Default)]
pub struct DatabaseProbe {
    pool: Option<PgPool>,
}

impl DatabaseProbe {
    /// Probe `pool`, or report "not configured" when `None`.
    #[must_use]
    pub const fn new(pool: Option<PgPool>) -> Self {
        Self { pool }
    }

    /// The probed pool.
    #[must_use]
    pub const fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl ReadinessProbe for DatabaseProbe {
    async fn database(&self) -> DependencyStatus {
        let Some(pool) = &self.pool else {
            return DependencyStatus::NotConfigured;
        };

        match supperclub_postgres::ping(pool).await {
            Ok(()) => DependencyStatus::Up,
            Err(e) => DependencyStatus::Down(e.to_string()),
        }
    }
}
