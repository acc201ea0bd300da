//! Configuration management for the reservation service.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Empty values count as unset. Numeric values that do not parse abort
//! startup with a [`ConfigError`] instead of silently falling back.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value does not parse.
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Deployment environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnvironment {
    /// Local development; email falls back to the console provider
    Development,
    /// Anything else
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            _ => Self::Production,
        }
    }

    /// `true` in development.
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Deployment environment
    pub environment: AppEnvironment,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Database configuration; `None` runs without persistence
    pub database: Option<DatabaseConfig>,
    /// Tenant slug served by this process
    pub business_slug: String,
    /// Email delivery configuration
    pub email: EmailConfig,
    /// Address notified when a business has no recipient list
    pub fallback_email: Option<String>,
    /// How long a reservation response waits for notification outcomes
    pub notification_timeout: Duration,
    /// Event length assumed when an event has no end time
    pub event_default_duration: chrono::Duration,
    /// Install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
}

/// HTTP server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Single allowed CORS origin; any origin when unset
    pub cors_allowed_origin: Option<String>,
    /// Log output format
    pub log_format: LogFormat,
}

/// `PostgreSQL` configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &redact_url(&self.url))
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Email delivery configuration
#[derive(Clone)]
pub struct EmailConfig {
    /// Provider API key
    pub api_key: Option<String>,
    /// Provider base URL
    pub api_url: String,
    /// From address
    pub sender_email: String,
    /// From display name
    pub sender_name: String,
    /// Template for the staff-facing request
    pub template_reservation_request: Option<u64>,
    /// Template for the customer acknowledgement
    pub template_reservation_confirmation: Option<u64>,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("template_reservation_request", &self.template_reservation_request)
            .field(
                "template_reservation_confirmation",
                &self.template_reservation_confirmation,
            )
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric or boolean variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric or boolean variable is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database = match var("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 5)?,
                connect_timeout: Duration::from_secs(parse_or(&var, "DATABASE_CONNECT_TIMEOUT", 10)?),
            }),
            None => None,
        };

        let log_format = match var("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase) {
            Some(format) if format == "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            environment: var("APP_ENV")
                .map_or(AppEnvironment::Production, |value| AppEnvironment::parse(&value)),
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&var, "PORT", 8080)?,
                cors_allowed_origin: var("CORS_ALLOWED_ORIGIN"),
                log_format,
            },
            database,
            business_slug: var("BUSINESS_SLUG").unwrap_or_else(|| "supper-club".to_string()),
            email: EmailConfig {
                api_key: var("BREVO_API_KEY"),
                api_url: var("BREVO_API_URL")
                    .unwrap_or_else(|| "https://api.brevo.com/v3".to_string()),
                sender_email: var("BREVO_SENDER_EMAIL")
                    .unwrap_or_else(|| "reservations@supperclub.example".to_string()),
                sender_name: var("BREVO_SENDER_NAME").unwrap_or_else(|| "Supper Club".to_string()),
                template_reservation_request: parse_optional(
                    &var,
                    "BREVO_TEMPLATE_RESERVATION_REQUEST",
                )?,
                template_reservation_confirmation: parse_optional(
                    &var,
                    "BREVO_TEMPLATE_RESERVATION_CONFIRMATION",
                )?,
            },
            fallback_email: var("RESERVATION_FALLBACK_EMAIL"),
            notification_timeout: Duration::from_secs(parse_or(&var, "NOTIFICATION_TIMEOUT_SECS", 12)?),
            event_default_duration: parse_minutes(&var, "EVENT_DEFAULT_DURATION_MINUTES", 180)?,
            metrics_enabled: parse_or(&var, "METRICS_ENABLED", true)?,
        })
    }

    /// `host:port` to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_optional<T, F>(var: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|value| {
            value.parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_optional(var, key)?.unwrap_or(default))
}

/// A non-negative whole number of minutes.
fn parse_minutes<F>(
    var: &F,
    key: &'static str,
    default: i64,
) -> Result<chrono::Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let minutes = parse_or(var, key, default)?;
    let invalid = |reason: &str| ConfigError::Invalid {
        key,
        value: minutes.to_string(),
        reason: reason.to_string(),
    };

    if minutes < 0 {
        return Err(invalid("must not be negative"));
    }
    chrono::Duration::try_minutes(minutes).ok_or_else(|| invalid("out of range"))
}

/// Hide the password part of a connection URL.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
