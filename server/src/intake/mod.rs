//! Reservation intake pipeline.
//!
//! # Flow
//!
//! ```text
//! ReservationForm
//!     │ validate(today)              ── 400 on failure, nothing else runs
//!     ▼
//! BusinessResolver (one retry on a miss)
//!     │
//!     ├──► ReservationRecorder ─┐
//!     │                         ├── tokio::join!
//!     └──► RecipientResolver ───┘
//!              │
//!              ▼
//!     Notifier::dispatch  ── two spawned sends
//!              │
//!              ▼
//!     timeout(ceiling, wait) ── sends still running keep going
//! ```
//!
//! Once validation passes the pipeline cannot fail: every later problem is
//! logged and folded into [`IntakeOutcome`].

mod business;
mod recipients;
mod recorder;

pub use business::BusinessResolver;
pub use recipients::RecipientResolver;
pub use recorder::ReservationRecorder;

use crate::metrics;
use std::sync::Arc;
use std::time::{Duration, Instant};
use supperclub_core::{
    BusinessId, Clock, ReservationForm, ReservationId, ValidReservation, ValidationError,
};
use supperclub_notifications::{NotificationReport, Notifier};
use tracing::{info, warn};

/// What happened to an accepted reservation request.
#[derive(Clone, Debug)]
pub struct IntakeOutcome {
    /// Business the request was filed under
    pub business_id: Option<BusinessId>,
    /// Stored row, if the insert happened
    pub reservation_id: Option<ReservationId>,
    /// Restaurant recipients used
    pub recipients: Vec<String>,
    /// Send outcomes, or `None` if the ceiling elapsed first
    pub notifications: Option<NotificationReport>,
}

/// Runs a reservation form through the whole pipeline.
#[derive(Clone)]
pub struct ReservationIntake {
    clock: Arc<dyn Clock>,
    businesses: BusinessResolver,
    recorder: ReservationRecorder,
    recipients: RecipientResolver,
    notifier: Notifier,
    notification_timeout: Duration,
}

impl ReservationIntake {
    /// Assemble the pipeline.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        businesses: BusinessResolver,
        recorder: ReservationRecorder,
        recipients: RecipientResolver,
        notifier: Notifier,
        notification_timeout: Duration,
    ) -> Self {
        Self {
            clock,
            businesses,
            recorder,
            recipients,
            notifier,
            notification_timeout,
        }
    }

    /// Validate, record and notify.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] if the form is rejected. Nothing is
    /// written or sent in that case.
    pub async fn submit(&self, form: &ReservationForm) -> Result<IntakeOutcome, ValidationError> {
        let started = Instant::now();
        metrics::record_reservation_received();

        let reservation = form.validate(self.clock.today()).map_err(|e| {
            info!(reason = e.reason(), "Reservation request rejected: {e}");
            metrics::record_reservation_rejected(e.reason());
            e
        })?;

        let outcome = self.process(reservation).await;
        metrics::record_intake_duration(started.elapsed());
        Ok(outcome)
    }

    async fn process(&self, reservation: ValidReservation) -> IntakeOutcome {
        let business_id = match self.businesses.resolve(None).await {
            Some(id) => Some(id),
            None => {
                warn!(
                    slug = self.businesses.default_slug(),
                    "Business not resolved, retrying lookup"
                );
                self.businesses.resolve(None).await
            }
        };

        let (reservation_id, recipients) = tokio::join!(
            self.recorder.record(&reservation, business_id),
            self.recipients.resolve(business_id),
        );

        info!(
            meal = %reservation.meal_type,
            party_size = reservation.party_size,
            date = %reservation.date,
            time = %reservation.time,
            recipients = recipients.len(),
            "Dispatching reservation notifications"
        );

        let pending = self.notifier.dispatch(reservation, recipients.clone());
        let notifications = match tokio::time::timeout(self.notification_timeout, pending.wait()).await {
            Ok(report) => {
                if !report.all_succeeded() {
                    warn!(
                        restaurant_request = report.restaurant_request.as_str(),
                        customer_confirmation = report.customer_confirmation.as_str(),
                        "Some reservation notifications failed"
                    );
                }
                Some(report)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.notification_timeout.as_secs_f64(),
                    "Notifications still in flight, responding without them"
                );
                metrics::record_notification_wait_timeout();
                None
            }
        };

        IntakeOutcome {
            business_id,
            reservation_id,
            recipients,
            notifications,
        }
    }
}

impl std::fmt::Debug for ReservationIntake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationIntake")
            .field("businesses", &self.businesses)
            .field("recipients", &self.recipients)
            .field("notifier", &self.notifier)
            .field("notification_timeout", &self.notification_timeout)
            .finish_non_exhaustive()
    }
}
