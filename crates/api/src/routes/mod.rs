//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod health;
pub mod loans;
pub mod transactions;
pub mod transfers;
pub mod withdrawals;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(transactions::routes())
        .merge(transfers::routes())
        .merge(withdrawals::routes())
        .merge(loans::routes())
}
