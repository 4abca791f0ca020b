//! Cash movement routes and ledger summaries.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::NaiveDate;
use serde::Deserialize;
use staybook_core::ledger::{
    LedgerSummary, MonthSummary, MovementDraft, MovementPatch, MovementType, Partner,
};
use staybook_db::repositories::{
    MovementFilter, MovementRepository, MovementWithCategory, ReportRepository,
};
use staybook_shared::types::Currency;
use uuid::Uuid;

use super::reservations::page_request;
use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::{ApiResult, AppState};

/// Creates the movement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/movements", get(list_movements).post(create_movement))
        .route("/movements/summary", get(summary))
        .route("/movements/monthly-summary", get(monthly_summary))
        .route(
            "/movements/{movement_id}",
            get(get_movement).put(update_movement).delete(delete_movement),
        )
}

/// Query parameters for listing movements.
#[derive(Debug, Deserialize)]
pub struct ListMovementsQuery {
    /// Earliest date, inclusive.
    pub desde: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub hasta: Option<NaiveDate>,
    /// Only this type.
    pub movement_type: Option<MovementType>,
    /// Only this category.
    pub category_id: Option<Uuid>,
    /// Only this partner.
    pub partner: Option<Partner>,
    /// Only this currency.
    pub currency: Option<Currency>,
    /// Rows to skip.
    pub skip: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
}

/// Query parameters for the window summary.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Window start, inclusive.
    pub desde: NaiveDate,
    /// Window end, inclusive.
    pub hasta: NaiveDate,
}

/// Query parameters for the monthly summary.
#[derive(Debug, Deserialize)]
pub struct MonthlySummaryQuery {
    /// Calendar year.
    pub year: i32,
}

fn repository(state: &AppState) -> MovementRepository {
    MovementRepository::new((*state.db).clone())
}

/// POST `/movements` - Record a movement.
async fn create_movement(
    State(state): State<AppState>,
    AppJson(draft): AppJson<MovementDraft>,
) -> ApiResult<(StatusCode, Json<MovementWithCategory>)> {
    let movement = repository(&state).create(draft).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// GET `/movements` - List movements, newest first.
async fn list_movements(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListMovementsQuery>,
) -> ApiResult<Json<Vec<MovementWithCategory>>> {
    let filter = MovementFilter {
        desde: query.desde,
        hasta: query.hasta,
        movement_type: query.movement_type,
        category_id: query.category_id,
        partner: query.partner,
        currency: query.currency,
    };
    let page = page_request(query.skip, query.limit);
    Ok(Json(repository(&state).list(filter, page).await?))
}

/// GET `/movements/{movement_id}` - Get a movement with its category.
async fn get_movement(
    State(state): State<AppState>,
    AppPath(movement_id): AppPath<Uuid>,
) -> ApiResult<Json<MovementWithCategory>> {
    Ok(Json(repository(&state).get(movement_id).await?))
}

/// PUT `/movements/{movement_id}` - Partially update a movement.
async fn update_movement(
    State(state): State<AppState>,
    AppPath(movement_id): AppPath<Uuid>,
    AppJson(patch): AppJson<MovementPatch>,
) -> ApiResult<Json<MovementWithCategory>> {
    Ok(Json(repository(&state).update(movement_id, patch).await?))
}

/// DELETE `/movements/{movement_id}` - Delete a movement.
async fn delete_movement(
    State(state): State<AppState>,
    AppPath(movement_id): AppPath<Uuid>,
) -> ApiResult<StatusCode> {
    repository(&state).delete(movement_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/movements/summary` - Totals by type, partner and category.
async fn summary(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SummaryQuery>,
) -> ApiResult<Json<LedgerSummary>> {
    let reports = ReportRepository::new((*state.db).clone());
    Ok(Json(reports.summary(query.desde, query.hasta).await?))
}

/// GET `/movements/monthly-summary` - Twelve monthly rollups for a year.
async fn monthly_summary(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<MonthlySummaryQuery>,
) -> ApiResult<Json<Vec<MonthSummary>>> {
    let reports = ReportRepository::new((*state.db).clone());
    Ok(Json(reports.monthly_summary(query.year).await?))
}
