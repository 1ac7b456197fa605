//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness report returned by the health endpoint.
#[derive(Serialize)]
pub struct HealthReport {
    /// Always "ok" when the service can answer at all.
    pub status: &'static str,
    /// Crate version of the running server.
    pub server_version: &'static str,
}

async fn health() -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        server_version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the health route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
