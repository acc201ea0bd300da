//! Business metrics for the reservation service.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `supperclub_reservations_received_total` - Requests that reached the handler
//! - `supperclub_reservations_rejected_total{reason}` - Requests that failed validation
//! - `supperclub_reservations_recorded_total` - Pending rows written
//! - `supperclub_reservations_unrecorded_total{reason}` - Accepted requests with no row
//! - `supperclub_notifications_total{kind,outcome}` - Emails sent, skipped or failed
//! - `supperclub_notification_wait_timeouts_total` - Responses sent before both emails settled
//!
//! ## Histograms
//! - `supperclub_reservation_intake_duration_seconds` - Time from request to response

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Register all metric descriptions.
///
/// Call once at startup, after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "supperclub_reservations_received_total",
        "Reservation requests received"
    );
    describe_counter!(
        "supperclub_reservations_rejected_total",
        "Reservation requests rejected by validation, by reason"
    );
    describe_counter!(
        "supperclub_reservations_recorded_total",
        "Reservation requests stored as pending"
    );
    describe_counter!(
        "supperclub_reservations_unrecorded_total",
        "Accepted reservation requests that could not be stored, by reason"
    );
    describe_counter!(
        "supperclub_notifications_total",
        "Reservation emails by kind and outcome (sent, skipped, failed)"
    );
    describe_counter!(
        "supperclub_notification_wait_timeouts_total",
        "Reservation responses returned before both emails completed"
    );
    describe_histogram!(
        "supperclub_reservation_intake_duration_seconds",
        "Time taken to handle a reservation request"
    );

    tracing::info!("Business metrics registered");
}

/// Install the Prometheus recorder.
///
/// # Errors
///
/// Returns [`BuildError`] if bucket configuration is rejected or a recorder is
/// already installed.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0],
        )?
        .install_recorder()
}

/// A reservation request reached the handler.
pub fn record_reservation_received() {
    metrics::counter!("supperclub_reservations_received_total").increment(1);
}

/// A reservation request failed validation.
pub fn record_reservation_rejected(reason: &'static str) {
    metrics::counter!("supperclub_reservations_rejected_total", "reason" => reason).increment(1);
    tracing::debug!(reason, "Recorded reservation_rejected metric");
}

/// A pending row was written.
pub fn record_reservation_recorded() {
    metrics::counter!("supperclub_reservations_recorded_total").increment(1);
}

/// An accepted reservation has no row.
///
/// # Arguments
///
/// * `reason` - `business_not_found` or `insert_failed`
pub fn record_reservation_unrecorded(reason: &'static str) {
    metrics::counter!("supperclub_reservations_unrecorded_total", "reason" => reason).increment(1);
    tracing::debug!(reason, "Recorded reservation_unrecorded metric");
}

/// The response stopped waiting on notifications.
pub fn record_notification_wait_timeout() {
    metrics::counter!("supperclub_notification_wait_timeouts_total").increment(1);
}

/// Record how long an intake took.
pub fn record_intake_duration(elapsed: Duration) {
    metrics::histogram!("supperclub_reservation_intake_duration_seconds")
        .record(elapsed.as_secs_f64());
}
