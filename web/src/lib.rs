//! Axum plumbing for the Supper Club reservation service.
//!
//! Shared by every HTTP surface of the service:
//!
//! - [`AppError`]: maps failures to `{ "success": false, "error", "code" }`
//! - [`correlation_id_layer`]: tags every request with a correlation id
//! - [`extractors`]: correlation id and client IP for handlers
//! - [`handlers::health`]: liveness and readiness endpoints
//!
//! # Request Flow
//!
//! 1. **Correlation** id read from `X-Correlation-ID` or generated
//! 2. **Span** opened with method, path and correlation id
//! 3. **Handler** runs; failures become [`AppError`]
//! 4. **Response** carries the correlation id back to the client
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use supperclub_web::{correlation_id_layer, handlers::health_check};
//!
//! let app = Router::new()
//!     .route("/health", get(health_check))
//!     .layer(correlation_id_layer());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{ClientIp, CorrelationId};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
