//! Supper Club reservation server.
//!
//! # Usage
//!
//! ```bash
//! cp .env.example .env   # then fill in DATABASE_URL and BREVO_API_KEY
//! cargo run --bin supperclub-server
//! ```

use supperclub_server::config::LogFormat;
use supperclub_server::{Config, Dependencies, build_app, metrics};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_tracing(config.server.log_format);

    tracing::info!(
        environment = ?config.environment,
        business_slug = %config.business_slug,
        database = config.database.is_some(),
        "Starting Supper Club reservation server"
    );
    tracing::debug!(?config, "Configuration loaded");

    let prometheus = if config.metrics_enabled {
        let handle = metrics::install_prometheus()?;
        metrics::register_metrics();
        Some(handle)
    } else {
        None
    };

    let deps = Dependencies::from_config(&config);
    if let Some(pool) = deps.probe.pool() {
        match supperclub_postgres::migrate(pool).await {
            Ok(()) => tracing::info!("Database migrations applied"),
            Err(e) => tracing::warn!(error = %e, "Database migrations not applied"),
        }
    }

    let app = build_app(&config, deps, prometheus);

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,supperclub=debug,sqlx=warn".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
