//! `/ping` health endpoint.

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

pub const PING_RESPONSE: &str = "🏓 pong\nBot status: operational";

async fn ping() -> &'static str {
    PING_RESPONSE
}

pub fn router() -> Router {
    Router::new().route("/ping", get(ping))
}

/// Binds on all interfaces. Bind errors surface here so startup fails before polling begins.
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind health endpoint on {}", addr))
}

/// Serves until the task is aborted.
pub async fn serve(listener: TcpListener) {
    let addr = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_default();
    info!(listen = %addr, "Web server started");
    if let Err(e) = axum::serve(listener, router()).await {
        error!(listen = %addr, err = ?e, "Health endpoint stopped");
    }
}
