//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Request extractors that answer rejections with the JSON error body
//! - Error responses built from `AppError`

pub mod error;
pub mod extractors;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use sea_orm::DatabaseConnection;
use staybook_core::integration::FeedRegistry;
use staybook_shared::config::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// External reservation feeds keyed by platform.
    pub feeds: Arc<FeedRegistry>,
}

impl AppState {
    /// Creates the state from a connection and the configured feeds.
    #[must_use]
    pub fn new(db: DatabaseConnection, feeds: FeedRegistry) -> Self {
        Self {
            db: Arc::new(db),
            feeds: Arc::new(feeds),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

/// Builds the CORS layer; no configured origins means any origin.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
