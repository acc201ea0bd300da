//! Reservation request endpoint.

use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use supperclub_core::ReservationForm;
use supperclub_web::{AppError, ClientIp, CorrelationId, WebResult};

/// Body returned once a request is accepted.
#[derive(Debug, Serialize)]
pub struct ReservationAccepted {
    /// Always `true`
    pub success: bool,
    /// Human-readable confirmation
    pub message: &'static str,
}

/// Accept a reservation request from the website.
///
/// Validation failures are 400s. Once the form is valid the response is
/// always 200, whether or not the row was stored or the emails went out;
/// those outcomes only show up in logs and metrics.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/reservations \
///   -H "Content-Type: application/json" \
///   -d '{
///     "partySize": "2",
///     "mealType": "dinner",
///     "date": "2999-01-01",
///     "time": "19:00",
///     "email": "a.b@x.com",
///     "phone": "555-1234"
///   }'
/// # {"success":true,"message":"Reservation request received"}
/// ```
///
/// # Errors
///
/// - 400 with the first failed rule's message
/// - 500 if the body is not a JSON object
pub async fn create_reservation(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    ClientIp(client_ip): ClientIp,
    payload: Result<Json<ReservationForm>, JsonRejection>,
) -> WebResult<Json<ReservationAccepted>> {
    let Json(form) = payload.map_err(|rejection| {
        AppError::internal("Failed to process reservation")
            .with_source(anyhow::anyhow!(rejection.body_text()))
    })?;

    tracing::info!(
        correlation_id = %correlation_id,
        client_ip = %client_ip,
        meal_type = form.meal_type.as_deref().unwrap_or("-"),
        date = form.date.as_deref().unwrap_or("-"),
        "Reservation request received"
    );

    let outcome = state.intake.submit(&form).await?;

    tracing::info!(
        correlation_id = %correlation_id,
        recorded = outcome.reservation_id.is_some(),
        reservation_id = ?outcome.reservation_id.map(|id| id.to_string()),
        notifications_settled = outcome.notifications.is_some(),
        "Reservation request handled"
    );

    Ok(Json(ReservationAccepted {
        success: true,
        message: "Reservation request received",
    }))
}
