//! `PostgreSQL` repositories for the Supper Club reservation service.
//!
//! Implements the repository traits from `supperclub-core` over a shared
//! [`PgPool`]:
//!
//! - [`PostgresBusinessDirectory`] - tenant lookup by slug
//! - [`PostgresReservationRepository`] - reservation inserts
//! - [`PostgresSettingsRepository`] - notification recipients per business
//! - [`PostgresEventCalendar`] - published live-music events
//!
//! Queries use the runtime-checked `sqlx::query` API so the crate builds
//! without a live database.
//!
//! # Example
//!
//! ```ignore
//! use supperclub_postgres::{connect_lazy, PoolSettings, PostgresReservationRepository};
//!
//! let pool = connect_lazy("postgres://localhost/supperclub", &PoolSettings::default())?;
//! let reservations = PostgresReservationRepository::new(pool);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod businesses;
mod events;
mod reservations;
mod settings;

pub use businesses::PostgresBusinessDirectory;
pub use events::PostgresEventCalendar;
pub use reservations::PostgresReservationRepository;
pub use settings::PostgresSettingsRepository;

pub use sqlx::PgPool;

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use supperclub_core::{StoreError, StoreResult};

/// Connection pool sizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum open connections
    pub max_connections: u32,
    /// How long to wait for a connection before failing
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Build a pool without opening a connection.
///
/// Connections are established on first use, so the service starts even
/// while the database is unreachable.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the URL cannot be parsed.
pub fn connect_lazy(database_url: &str, settings: &PoolSettings) -> StoreResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.connect_timeout)
        .connect_lazy(database_url)
        .map_err(|e| StoreError::Database(format!("Invalid database URL: {e}")))
}

/// Apply the bundled schema migrations.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if a migration fails.
pub async fn migrate(pool: &PgPool) -> StoreResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Database(format!("Migration failed: {e}")))
}

/// Round-trip a trivial query.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the database is unreachable.
pub async fn ping(pool: &PgPool) -> StoreResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(database_error)
}

pub(crate) fn database_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}
