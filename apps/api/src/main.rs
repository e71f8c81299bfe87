mod assessment;
mod chat;
mod config;
mod errors;
mod extract;
mod results;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::sessions::{spawn_sweeper, SessionStore};
use crate::assessment::sink::LogSink;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // In-memory assessment sessions, swept for idle entries
    let sessions = Arc::new(SessionStore::new(config.session_ttl()));
    spawn_sweeper(
        sessions.clone(),
        Duration::from_secs(config.session_sweep_secs.max(1)),
    );
    info!(
        "Session store initialized (ttl: {}s, sweep: {}s)",
        config.session_ttl_secs, config.session_sweep_secs
    );

    let state = AppState {
        config: config.clone(),
        sessions,
        sink: Arc::new(LogSink),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
