//! Shared application state for HTTP handlers.

use crate::intake::{BusinessResolver, ReservationIntake};
use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use supperclub_core::{Clock, EventCalendar};
use supperclub_web::handlers::ReadinessProbe;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Reservation pipeline
    pub intake: ReservationIntake,
    /// Tenant lookup for read endpoints
    pub businesses: BusinessResolver,
    /// Event calendar
    pub events: Arc<dyn EventCalendar>,
    /// Time source for event status
    pub clock: Arc<dyn Clock>,
    /// Event length when `ends_at` is missing
    pub event_default_duration: chrono::Duration,
    /// Readiness checks
    pub probe: Arc<dyn ReadinessProbe>,
    /// Prometheus renderer, when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl FromRef<AppState> for Arc<dyn ReadinessProbe> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.probe)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("intake", &self.intake)
            .field("event_default_duration", &self.event_default_duration)
            .field("metrics_enabled", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
