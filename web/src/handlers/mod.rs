//! HTTP request handlers shared across services.

pub mod health;

// Re-export common handler utilities
pub use health::{DependencyStatus, ReadinessProbe, ReadinessReport, health_check, readiness_check};
