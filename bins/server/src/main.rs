//! Staybook API Server
//!
//! Main entry point for the Staybook backend service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use staybook_api::{AppState, create_router};
use staybook_core::integration::FeedRegistry;
use staybook_db::connect_with_pool;
use staybook_db::migration::{Migrator, MigratorTrait};
use staybook_shared::AppConfig;
use staybook_shared::config::LoggingConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    Migrator::up(&db, None).await?;
    info!("Database schema is up to date");

    let feeds = FeedRegistry::from_config(&config.integrations);
    info!(feeds = ?feeds, "Reservation feeds configured");

    let app = create_router(AppState::new(db, feeds), &config.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "staybook=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
