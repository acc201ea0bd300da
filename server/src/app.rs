//! Application bootstrap.
//!
//! Turns a [`Config`] into a ready-to-serve router: picks the email provider,
//! wires the repositories and assembles the intake pipeline.

use crate::config::{AppEnvironment, Config, EmailConfig};
use crate::intake::{BusinessResolver, RecipientResolver, ReservationIntake, ReservationRecorder};
use crate::probe::DatabaseProbe;
use crate::routes::build_router;
use crate::state::AppState;
use crate::stores::Stores;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use supperclub_core::{Clock, SystemClock};
use supperclub_notifications::{
    BodyStrategy, BrevoEmailProvider, ConsoleEmailProvider, EmailProvider, Mailbox, Notifier,
    NotifierConfig, UnconfiguredEmailProvider,
};
use tracing::{info, warn};

/// Everything the router needs besides configuration.
///
/// Production uses [`Dependencies::from_config`]; tests build one by hand
/// from in-memory doubles.
#[derive(Clone)]
pub struct Dependencies {
    /// Repositories
    pub stores: Stores,
    /// Email transport
    pub email: Arc<dyn EmailProvider>,
    /// Time source
    pub clock: Arc<dyn Clock>,
    /// Readiness probe
    pub probe: DatabaseProbe,
}

impl Dependencies {
    /// Production wiring.
    ///
    /// A database URL that does not parse is logged and the service runs
    /// without persistence.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let (stores, pool) = match &config.database {
            Some(database) => match Stores::postgres(database) {
                Ok((stores, pool)) => {
                    info!(max_connections = database.max_connections, "Database pool created");
                    (stores, Some(pool))
                }
                Err(e) => {
                    warn!(error = %e, "Database unusable, running without persistence");
                    (Stores::offline(), None)
                }
            },
            None => {
                warn!("DATABASE_URL not set, running without persistence");
                (Stores::offline(), None)
            }
        };

        Self {
            stores,
            email: select_email_provider(&config.email, config.environment),
            clock: Arc::new(SystemClock),
            probe: DatabaseProbe::new(pool),
        }
    }
}

impl std::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependencies")
            .field("email", &self.email.name())
            .field("probe", &self.probe)
            .finish_non_exhaustive()
    }
}

/// Pick the email transport.
///
/// | API key | Environment | Provider |
/// |---------|-------------|----------|
/// | set | any | Brevo |
/// | unset | development | console |
/// | unset | other | unconfigured (every send fails) |
#[must_use]
pub fn select_email_provider(
    email: &EmailConfig,
    environment: AppEnvironment,
) -> Arc<dyn EmailProvider> {
    match (&email.api_key, environment) {
        (Some(key), _) => Arc::new(BrevoEmailProvider::with_api_url(
            key.clone(),
            email.api_url.clone(),
        )),
        (None, AppEnvironment::Development) => {
            info!("No email API key, logging emails to the console");
            Arc::new(ConsoleEmailProvider::new())
        }
        (None, AppEnvironment::Production) => {
            warn!("No email API key, reservation emails will fail");
            Arc::new(UnconfiguredEmailProvider::new())
        }
    }
}

/// Notifier settings derived from configuration.
#[must_use]
pub fn notifier_config(email: &EmailConfig) -> NotifierConfig {
    NotifierConfig {
        sender: Mailbox::named(email.sender_email.clone(), email.sender_name.clone()),
        restaurant_request: BodyStrategy::from_template_id(email.template_reservation_request),
        customer_confirmation: BodyStrategy::from_template_id(
            email.template_reservation_confirmation,
        ),
    }
}

/// Build the router.
///
/// `metrics` is the installed Prometheus handle, if any; `/metrics` is only
/// routed when it is present.
#[must_use]
pub fn build_app(
    config: &Config,
    deps: Dependencies,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let businesses = BusinessResolver::new(deps.stores.businesses.clone(), config.business_slug.clone());
    let notifier = Notifier::new(deps.email, notifier_config(&config.email));

    let intake = ReservationIntake::new(
        deps.clock.clone(),
        businesses.clone(),
        ReservationRecorder::new(deps.stores.reservations.clone()),
        RecipientResolver::new(deps.stores.settings.clone(), config.fallback_email.clone()),
        notifier,
        config.notification_timeout,
    );

    let state = AppState {
        intake,
        businesses,
        events: deps.stores.events.clone(),
        clock: deps.clock,
        event_default_duration: config.event_default_duration,
        probe: Arc::new(deps.probe),
        metrics,
    };

    build_router(state, config.server.cors_allowed_origin.as_deref())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_api_key_selects_brevo() {
        let config = config(&[("BREVO_API_KEY", "xkeysib-123")]);
        let provider = select_email_provider(&config.email, config.environment);
        assert_eq!(provider.name(), "brevo");
    }

    #[test]
    fn test_development_without_key_selects_console() {
        let config = config(&[("APP_ENV", "development")]);
        let provider = select_email_provider(&config.email, config.environment);
        assert_eq!(provider.name(), "console");
    }

    #[test]
    fn test_production_without_key_is_unconfigured() {
        let config = config(&[]);
        let provider = select_email_provider(&config.email, config.environment);
        assert_eq!(provider.name(), "unconfigured");
    }

    #[test]
    fn test_template_ids_choose_body_strategy() {
        let config = config(&[("BREVO_TEMPLATE_RESERVATION_CONFIRMATION", "12")]);
        let notifier = notifier_config(&config.email);

        assert_eq!(notifier.restaurant_request, BodyStrategy::Inline);
        assert_eq!(notifier.customer_confirmation, BodyStrategy::Template(12));
        assert_eq!(notifier.sender.email, "reservations@supperclub.example");
    }
}
