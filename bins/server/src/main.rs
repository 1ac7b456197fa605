//! Ferrum API Server
//!
//! Main entry point for the Ferrum ledger service.

use std::sync::Arc;

use chrono::TimeDelta;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ferrum_api::{AppState, create_router};
use ferrum_core::transfer::DEFAULT_OTP_TTL_SECS;
use ferrum_db::connect;
use ferrum_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ferrum=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    let otp_ttl = i64::try_from(config.transfer.otp_ttl_secs)
        .map_or_else(|_| TimeDelta::seconds(DEFAULT_OTP_TTL_SECS), TimeDelta::seconds);
    info!(otp_ttl_secs = %otp_ttl.num_seconds(), "Transfer one-time codes configured");

    // Create application state
    let state = AppState::new(Arc::new(db)).with_otp_ttl(otp_ttl);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
