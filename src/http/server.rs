//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the base Axum router
//! - Fire `on_before_serve` with the router and the not-yet-bound settings
//! - Wire up middleware (timeout, CORS, tracing) after handlers had their say
//! - Bind the listener and serve until the shutdown token fires

use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::app::App;
use crate::config::ServeConfig;
use crate::error::AppError;
use crate::hooks::{PendingServer, ServeEvent};
use crate::http::cors::build_cors_layer;

/// Routes every Maple server starts with.
pub fn base_router() -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, World 👋!" }))
        .route("/api/health", get(health_handler))
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "code": 200,
        "message": "API is healthy.",
    }))
}

impl PendingServer {
    fn from_config(config: &ServeConfig, has_domains: bool) -> Self {
        Self {
            addr: config.resolve_addr(has_domains),
            allowed_origins: config.allowed_origins.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Apply the middleware stack to a finished router.
#[allow(deprecated)]
fn finalize_router(router: Router, server: &PendingServer) -> Router {
    router
        .layer(TimeoutLayer::new(server.request_timeout))
        .layer(build_cors_layer(&server.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until `shutdown` is cancelled.
///
/// A failing `on_before_serve` handler aborts before anything binds.
pub async fn serve(
    app: App,
    config: ServeConfig,
    has_domains: bool,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let mut event = ServeEvent {
        app: app.clone(),
        router: base_router(),
        server: PendingServer::from_config(&config, has_domains),
    };

    app.hooks().fire_on_before_serve(&mut event)?;

    let ServeEvent { router, server, .. } = event;
    let addr: SocketAddr = server
        .addr
        .parse()
        .map_err(|_| AppError::InvalidAddress(server.addr.clone()))?;
    let router = finalize_router(router, &server);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: server.addr.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(AppError::Serve)?;

    tracing::info!(
        address = %local_addr,
        origins = ?server.allowed_origins,
        "HTTP server starting"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(AppError::Serve)?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
