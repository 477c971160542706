//! HTTP gateway: router, shared state, pages and JSON endpoints.
//!
//! Layer order (outermost first): request tracing → session resolution →
//! access gate → handler.

pub mod gate;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::session::{self, session_layer};
use crate::user_auth::{self, access_gate};
use state::AppState;

/// Build the application router over shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    let internal_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/style.css", get(handlers::stylesheet))
        .route("/openapi.json", get(handlers::openapi_json));

    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/login",
            get(handlers::login_page).post(user_auth::handlers::login_submit),
        )
        .route("/logout", post(user_auth::handlers::logout))
        .route("/info", get(handlers::get_info))
        .nest(gate::INTERNAL_PREFIX, internal_routes)
        .fallback(handlers::not_found)
        // Applied bottom-up: the session layer runs before the gate
        .layer(from_fn(access_gate))
        .layer(from_fn_with_state(state.clone(), session_layer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server; returns when ctrl-c is received
pub async fn run_server(
    config: &ServerConfig,
    state: Arc<AppState>,
    purge_interval: Duration,
) -> anyhow::Result<()> {
    let purge_task = session::spawn_purge_task(state.sessions.clone(), purge_interval);

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("authgate listening on http://{}", addr);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error");

    purge_task.abort();
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
