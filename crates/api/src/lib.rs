//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Error-to-response mapping
//! - Response types

pub mod error;
pub mod routes;

use axum::Router;
use chrono::TimeDelta;
use ferrum_core::transfer::DEFAULT_OTP_TTL_SECS;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Lifetime of transfer one-time codes.
    pub otp_ttl: TimeDelta,
}

impl AppState {
    /// Creates application state with the default OTP lifetime.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            otp_ttl: TimeDelta::seconds(DEFAULT_OTP_TTL_SECS),
        }
    }

    /// Overrides the OTP lifetime.
    #[must_use]
    pub const fn with_otp_ttl(mut self, ttl: TimeDelta) -> Self {
        self.otp_ttl = ttl;
        self
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
