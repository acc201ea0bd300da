//! Persists accepted reservation requests.

use crate::metrics;
use std::sync::Arc;
use supperclub_core::{BusinessId, ReservationId, ReservationRepository, ValidReservation};
use tracing::{error, info};

/// Writes `pending` reservation rows.
///
/// Never fails: a missing business or a failed insert is logged and the
/// request carries on without a row.
#[derive(Clone)]
pub struct ReservationRecorder {
    repository: Arc<dyn ReservationRepository>,
}

impl ReservationRecorder {
    /// Create a recorder over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn ReservationRepository>) -> Self {
        Self { repository }
    }

    /// Insert the reservation for `business_id`.
    pub async fn record(
        &self,
        reservation: &ValidReservation,
        business_id: Option<BusinessId>,
    ) -> Option<ReservationId> {
        let Some(business_id) = business_id else {
            error!(
                email = %reservation.email,
                date = %reservation.date,
                "Business not found, reservation request was not recorded"
            );
            metrics::record_reservation_unrecorded("business_not_found");
            return None;
        };

        match self
            .repository
            .insert(reservation.to_new_reservation(business_id))
            .await
        {
            Ok(reservation_id) => {
                info!(
                    business_id = %business_id,
                    reservation_id = %reservation_id,
                    party_size = reservation.party_size,
                    date = %reservation.date,
                    "Reservation recorded"
                );
                metrics::record_reservation_recorded();
                Some(reservation_id)
            }
            Err(e) => {
                error!(business_id = %business_id, error = %e, "Failed to record reservation");
                metrics::record_reservation_unrecorded("insert_failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for ReservationRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationRecorder").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use supperclub_core::ReservationStatus;
    use supperclub_testing::{InMemoryReservationRepository, fixtures};

    #[tokio::test]
    async fn test_records_pending_row() {
        let repository = InMemoryReservationRepository::new();
        let recorder = ReservationRecorder::new(Arc::new(repository.clone()));
        let business_id = BusinessId::new();

        let id = recorder
            .record(&fixtures::valid_reservation(), Some(business_id))
            .await;

        let rows = repository.all();
        assert_eq!(rows.len(), 1);
        assert_eq!(Some(rows[0].id), id);
        assert_eq!(rows[0].business_id, business_id);
        assert_eq!(rows[0].status, ReservationStatus::Pending);
        assert_eq!(rows[0].party_size, 2);
    }

    #[tokio::test]
    async fn test_no_business_means_no_row() {
        let repository = InMemoryReservationRepository::new();
        let recorder = ReservationRecorder::new(Arc::new(repository.clone()));

        assert_eq!(recorder.record(&fixtures::valid_reservation(), None).await, None);
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_insert_failure_is_swallowed() {
        let repository = InMemoryReservationRepository::new();
        repository.set_failing(true);
        let recorder = ReservationRecorder::new(Arc::new(repository.clone()));

        let id = recorder
            .record(&fixtures::valid_reservation(), Some(BusinessId::new()))
            .await;

        assert_eq!(id, None);
        assert!(repository.is_empty());
    }
}
