//! # Supper Club Server
//!
//! HTTP service that takes reservation requests from the restaurant website,
//! files them as `pending`, and emails the restaurant and the customer.
//!
//! ## Modules
//!
//! - [`config`]: environment-driven configuration
//! - [`intake`]: the reservation pipeline
//! - [`api`]: HTTP handlers
//! - [`app`]: wiring from configuration to router
//! - [`metrics`]: Prometheus counters and histograms
//!
//! ## Running
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/supperclub \
//! BREVO_API_KEY=xkeysib-... \
//! cargo run --bin supperclub-server
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod app;
pub mod config;
pub mod intake;
pub mod metrics;
pub mod probe;
pub mod routes;
pub mod state;
pub mod stores;

pub use app::{Dependencies, build_app};
pub use config::{Config, ConfigError};
pub use state::AppState;
