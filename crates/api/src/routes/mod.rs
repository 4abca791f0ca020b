//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod categories;
pub mod health;
pub mod integrations;
pub mod movements;
pub mod properties;
pub mod reservations;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(properties::routes())
        .merge(reservations::routes())
        .merge(categories::routes())
        .merge(movements::routes())
        .merge(integrations::routes())
}
