//!
//! Restaurant table reservation REST service.
//! Reads configuration from TOML file (~/.config/tablebook/config.toml).

use std::future::IntoFuture;
use std::sync::Arc;

use tracing::{error, info, warn};

use tablebook::application::{BookingService, TableLocationService};
use tablebook::config::AppConfig;
use tablebook::domain::RepositoryProvider;
use tablebook::shared::shutdown::ShutdownCoordinator;
use tablebook::{create_api_router, default_config_path, InMemoryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("TABLEBOOK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Tablebook Reservation Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Storage ────────────────────────────────────────────────
    let store = if app_cfg.server.seed_demo_data {
        info!("Seeding demo table locations");
        InMemoryStore::with_demo_tables()
    } else {
        InMemoryStore::new()
    };
    let repos: Arc<dyn RepositoryProvider> = Arc::new(store);

    // ── Services ───────────────────────────────────────────────
    let booking_service = Arc::new(BookingService::new(repos.clone(), app_cfg.booking.clone()));
    let table_service = Arc::new(TableLocationService::new(
        repos.clone(),
        app_cfg.booking.clone(),
    ));

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // Create REST API router
    let api_router = create_api_router(repos, booking_service, table_service, prometheus_handle);

    // Start REST API server with graceful shutdown
    let api_addr = app_cfg.api_address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let server = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .into_future();

    // The drain after the signal is bounded by the configured timeout
    tokio::select! {
        result = server => {
            result?;
            info!("✅ Graceful shutdown completed");
        }
        _ = shutdown.drain_deadline() => {
            warn!(
                "⚠️ Graceful shutdown timed out after {}s, aborting open connections",
                shutdown.timeout_secs()
            );
        }
    }

    info!("👋 Tablebook Reservation Service shutdown complete");
    Ok(())
}
