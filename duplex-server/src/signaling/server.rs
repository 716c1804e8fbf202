use crate::config::RelayConfig;
use crate::registry::Relay;
use crate::signaling::ws_handler;
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

pub fn router(relay: Relay) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(relay)
}

/// Serves the relay on an already bound listener until `shutdown` resolves.
pub async fn serve_listener<F>(listener: TcpListener, relay: Relay, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Signaling relay listening on ws://{}/ws", addr);

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Signaling relay stopped unexpectedly")
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    serve_listener(listener, Relay::from_config(&config), shutdown_signal()).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
