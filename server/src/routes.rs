//! Router configuration.

use crate::api::{events, reservations};
use crate::state::AppState;
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use supperclub_web::handlers::{health_check, readiness_check};
use supperclub_web::{AppError, correlation_id_layer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// # Routes
///
/// - `GET /health`, `GET /ready`
/// - `GET /metrics` (Prometheus text, only with metrics enabled)
/// - `POST /api/reservations`
/// - `GET /api/events`
///
/// `cors_allowed_origin` restricts CORS to one origin; `None` allows any.
pub fn build_router(state: AppState, cors_allowed_origin: Option<&str>) -> Router {
    let api_routes = Router::new()
        .route("/reservations", post(reservations::create_reservation))
        .route("/events", get(events::list_events));

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(render_metrics));
    }

    router
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_allowed_origin))
        .layer(correlation_id_layer())
        .with_state(state)
}

fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match allowed_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Invalid CORS origin, allowing any origin");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}

async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => AppError::not_found("Metrics are disabled").into_response(),
    }
}

#[allow(clippy::unused_async)] // Axum handler signature requires async
async fn not_found() -> AppError {
    AppError::not_found("Not found")
}
