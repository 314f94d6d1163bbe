//! Voyage Server - REST backend for voyage performance analysis

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voyage_server::api;
use voyage_server::config::Config;
use voyage_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("voyage_server=debug".parse()?)
            .add_directive("voyage_core=info".parse()?))
        .init();

    tracing::info!("Starting Voyage Server...");

    let config = Config::from_env();
    if config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set; weather will be simulated");
    }

    let port = config.server_port;
    let state = Arc::new(AppState::new(config));
    tracing::info!(routes = state.catalog().len(), "Route catalog loaded");
    if state.insights().is_configured() {
        tracing::info!(model = %state.config().gemini_model, "Insight generation enabled");
    } else {
        tracing::warn!("GEMINI_API_KEY not set; insights will use fallback text");
    }

    let app = api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
