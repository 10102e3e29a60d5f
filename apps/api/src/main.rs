mod analysis;
mod calculator;
mod catalog;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod tips;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;
use std::time::Duration;

use crate::analysis::oracle::GeminiOracle;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::registry::SessionRegistry;
use crate::state::AppState;

const IDLE_SWEEP_EVERY: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast when GEMINI_API_KEY is missing
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LoanVerify API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
    )?;
    info!(
        "Gemini client initialized (model: {}, base: {})",
        llm_client::MODEL,
        config.gemini_base_url
    );

    let sessions = SessionRegistry::new();
    sessions.spawn_idle_sweeper(
        Duration::from_secs(config.session_idle_secs),
        IDLE_SWEEP_EVERY,
    );
    info!(
        "Session limits: {} bytes per session, idle after {}s",
        config.max_session_bytes, config.session_idle_secs
    );

    let state = AppState {
        sessions,
        oracle: Arc::new(GeminiOracle(llm)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
