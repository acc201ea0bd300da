//! Reservation inserts.

use crate::database_error;
use async_trait::async_trait;
use sqlx::PgPool;
use supperclub_core::{NewReservation, ReservationId, ReservationRepository, StoreResult};

/// `PostgreSQL` reservation repository.
#[derive(Clone, Debug)]
pub struct PostgresReservationRepository {
    pool: PgPool,
}

impl PostgresReservationRepository {
    /// Create a repository over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn insert(&self, reservation: NewReservation) -> StoreResult<ReservationId> {
        let id = ReservationId::new();

        sqlx::query(
            r"
            INSERT INTO reservations (
                id, business_id, customer_name, customer_email, customer_phone,
                reservation_date, reservation_time, party_size, special_requests, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(id.as_uuid())
        .bind(reservation.business_id.as_uuid())
        .bind(&reservation.customer_name)
        .bind(&reservation.customer_email)
        .bind(&reservation.customer_phone)
        .bind(reservation.reservation_date)
        .bind(&reservation.reservation_time)
        .bind(reservation.party_size)
        .bind(reservation.special_requests.as_deref())
        .bind(reservation.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        tracing::debug!(
            reservation_id = %id,
            business_id = %reservation.business_id,
            "Reservation row inserted"
        );

        Ok(id)
    }
}
