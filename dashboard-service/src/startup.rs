//! Application startup and lifecycle management.

use crate::config::DashboardConfig;
use crate::fixtures::Fixtures;
use crate::handlers::health::{health_check, metrics_handler, readiness_check};
use crate::handlers::query::list_invoices;
use crate::handlers::seed::seed;
use crate::services::{init_metrics, Database};
use axum::{middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::metrics::metrics_middleware;
use service_core::middleware::security_headers::security_headers_middleware;
use service_core::middleware::tracing::request_id_middleware;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub fixtures: Arc<Fixtures>,
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    Router::new()
        .route("/query", get(list_invoices))
        .route("/seed", get(seed))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .layer(trace_layer)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the placeholder fixtures.
    pub async fn build(config: DashboardConfig) -> Result<Self, AppError> {
        Self::build_with_fixtures(config, Fixtures::placeholder()).await
    }

    /// Build the application seeding `fixtures` instead of the placeholder set.
    pub async fn build_with_fixtures(
        config: DashboardConfig,
        fixtures: Fixtures,
    ) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        let state = AppState {
            db: Arc::new(db),
            fixtures: Arc::new(fixtures),
        };

        let http_addr = config.common.address();
        let http_listener = TcpListener::bind(&http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Dashboard service listener bound");

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Serve until `shutdown` resolves, then stop accepting connections and
    /// let in-flight requests finish.
    pub async fn run_until_stopped<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let http_router = router(self.state);

        tracing::info!(
            service = "dashboard-service",
            version = env!("CARGO_PKG_VERSION"),
            http_port = self.http_port,
            "Service ready to accept connections"
        );

        axum::serve(self.http_listener, http_router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Graceful shutdown initiated");
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "HTTP server error");
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
