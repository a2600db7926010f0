//! Timesheet RS Server
//!
//! HTTP server for recording working, sick and vacation days.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ts_api::AppState;
use ts_core::config::{AppConfig, LogFormat, LoggingConfig, StoreBackend};
use ts_db::{Database, MemoryTimesheetStore, PgTimesheetRepository, TimesheetStore};
use ts_services::TimesheetService;

mod health;
mod metrics;

use health::{HealthChecker, HealthConfig};
use metrics::Metrics;

const DEFAULT_FILTER: &str = "info,ts_server=debug,ts_api=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;

    init_tracing(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "Starting Timesheet RS"
    );

    let (store, database) = connect_store(&config).await?;

    let metrics = Arc::new(Metrics::new());
    let backend = if database.is_some() { "postgres" } else { "memory" };
    let mut health_checker = HealthChecker::new(HealthConfig::default(), store.clone(), backend);
    if let Some(ref db) = database {
        health_checker = health_checker.with_database(db.clone());
    }

    let service = TimesheetService::new(store, config.timesheet.clone());
    let app = build_router(
        AppState::new(service),
        Arc::new(health_checker),
        metrics,
        config.server.max_body_size_bytes,
    );

    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = database {
        db.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(logging.filter.as_deref().unwrap_or(DEFAULT_FILTER))
    });

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
    }
}

/// Pick the store for the configured backend.
///
/// When PostgreSQL cannot be reached the server keeps running on the
/// in-memory store.
async fn connect_store(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn TimesheetStore>, Option<Database>)> {
    let uniqueness = config.timesheet.date_uniqueness;
    let memory = || -> Arc<dyn TimesheetStore> { Arc::new(MemoryTimesheetStore::new(uniqueness)) };

    match config.database.backend {
        StoreBackend::Memory => {
            info!("Using in-memory timesheet store");
            Ok((memory(), None))
        }
        StoreBackend::Postgres => match Database::connect(&config.database).await {
            Ok(db) => {
                info!("Connected to database");
                ts_db::schema::ensure_schema(db.pool(), uniqueness).await?;
                let repo = PgTimesheetRepository::new(db.pool().clone(), uniqueness);
                Ok((Arc::new(repo), Some(db)))
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to database: {}. Running with the in-memory store.",
                    e
                );
                Ok((memory(), None))
            }
        },
    }
}

/// Build the application router
fn build_router(
    state: AppState,
    health: Arc<HealthChecker>,
    metrics: Arc<Metrics>,
    max_body_size: usize,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/metrics.json", get(metrics::json_metrics))
        .with_state(metrics.clone());

    Router::new()
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(ts_api::router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .layer(middleware::from_fn_with_state(
            metrics,
            metrics::metrics_middleware,
        ))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
