//! External reservation sources: platform sync and CSV import.

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use chrono::NaiveDate;
use serde::Deserialize;
use staybook_core::integration::{FeedError, SyncOutcome};
use staybook_core::reservation::{DateWindow, Platform};
use staybook_db::repositories::ImportRepository;
use uuid::Uuid;

use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::{ApiResult, AppState};

/// Creates the integration routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/integrations/csv-import", post(import_csv))
        .route("/integrations/{platform}/sync", post(sync_platform))
}

/// Body of a sync request.
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    /// Property to sync.
    pub property_id: Uuid,
    /// Window start.
    pub desde: NaiveDate,
    /// Window end.
    pub hasta: NaiveDate,
}

/// Query parameters for a CSV import.
#[derive(Debug, Deserialize)]
pub struct CsvImportQuery {
    /// Property the rows belong to.
    pub property_id: Uuid,
}

/// POST `/integrations/{platform}/sync` - Pull reservations from a platform.
async fn sync_platform(
    State(state): State<AppState>,
    AppPath(raw_platform): AppPath<String>,
    AppJson(request): AppJson<SyncRequest>,
) -> ApiResult<Json<SyncOutcome>> {
    let platform: Platform = raw_platform
        .parse()
        .map_err(|_| FeedError::UnsupportedPlatform(raw_platform.clone()))?;
    let feed = state.feeds.get(platform)?;
    let window = DateWindow::new(request.desde, request.hasta)?;

    let imports = ImportRepository::new((*state.db).clone());
    let outcome = imports
        .sync(feed.as_ref(), request.property_id, window)
        .await?;
    Ok(Json(outcome))
}

/// POST `/integrations/csv-import` - Import reservations from a CSV export.
async fn import_csv(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CsvImportQuery>,
    body: Bytes,
) -> ApiResult<Json<SyncOutcome>> {
    let imports = ImportRepository::new((*state.db).clone());
    let outcome = imports.import_csv(query.property_id, &body).await?;
    Ok(Json(outcome))
}
