//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use async_trait::async_trait;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT check dependencies (database, etc.).
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)] // Axum handler signature requires async
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// State of one backing dependency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DependencyStatus {
    /// Reachable.
    Up,
    /// Configured but failing.
    Down(String),
    /// Not configured for this process.
    NotConfigured,
}

impl DependencyStatus {
    const fn label(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down(_) => "down",
            Self::NotConfigured => "not_configured",
        }
    }
}

/// Checks the dependencies readiness depends on.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Probe the database.
    async fn database(&self) -> DependencyStatus;
}

/// Readiness response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    /// Whether the service should receive traffic
    pub ready: bool,
    /// `up`, `down` or `not_configured`
    pub database: &'static str,
}

/// Readiness check.
///
/// A database that is configured but unreachable makes the service not
/// ready. Running without a database is a supported degraded mode and
/// still reports ready.
///
/// # Status Codes
///
/// - 200 OK: ready
/// - 503 Service Unavailable: database down
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
///
/// # Response
///
/// ```json
/// { "ready": true, "database": "up" }
/// ```
pub async fn readiness_check(
    State(probe): State<Arc<dyn ReadinessProbe>>,
) -> (StatusCode, Json<ReadinessReport>) {
    let database = probe.database().await;

    if let DependencyStatus::Down(reason) = &database {
        tracing::warn!(reason = %reason, "Readiness check failed: database unreachable");
    }

    let ready = !matches!(database, DependencyStatus::Down(_));
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessReport {
            ready,
            database: database.label(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(DependencyStatus);

    #[async_trait]
    impl ReadinessProbe for FixedProbe {
        async fn database(&self) -> DependencyStatus {
            self.0.clone()
        }
    }

    async fn check(status: DependencyStatus) -> (StatusCode, ReadinessReport) {
        let probe: Arc<dyn ReadinessProbe> = Arc::new(FixedProbe(status));
        let (status, Json(report)) = readiness_check(State(probe)).await;
        (status, report)
    }

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, body) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_ready_when_database_up() {
        let (status, report) = check(DependencyStatus::Up).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            report,
            ReadinessReport {
                ready: true,
                database: "up"
            }
        );
    }

    #[tokio::test]
    async fn test_not_ready_when_database_down() {
        let (status, report) = check(DependencyStatus::Down("connection refused".into())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!report.ready);
        assert_eq!(report.database, "down");
    }

    #[tokio::test]
    async fn test_ready_without_database() {
        let (status, report) = check(DependencyStatus::NotConfigured).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.database, "not_configured");
    }
}
