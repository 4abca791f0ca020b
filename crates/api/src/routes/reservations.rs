//! Reservation routes, including the calendar view.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use staybook_core::reservation::{
    CalendarEvent, Platform, ReservationDraft, ReservationPatch, resolve_window,
};
use staybook_db::repositories::{ReservationFilter, ReservationRepository, ReservationWithProperty};
use staybook_shared::types::PageRequest;
use uuid::Uuid;

use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::{ApiResult, AppState};

/// Creates the reservation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list_reservations).post(create_reservation))
        .route("/reservations/calendar", get(calendar))
        .route(
            "/reservations/{reservation_id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
}

/// Query parameters for listing reservations.
#[derive(Debug, Deserialize)]
pub struct ListReservationsQuery {
    /// Only this property.
    pub property_id: Option<Uuid>,
    /// Stays checking out after this day.
    pub desde: Option<NaiveDate>,
    /// Stays checking in before this day.
    pub hasta: Option<NaiveDate>,
    /// Only this platform.
    pub platform: Option<Platform>,
    /// Rows to skip.
    pub skip: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
}

/// Query parameters for the calendar view.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Window start, first day of the current month when omitted.
    pub desde: Option<NaiveDate>,
    /// Window end, last day of the start's month when omitted.
    pub hasta: Option<NaiveDate>,
    /// Only this property.
    pub property_id: Option<Uuid>,
}

fn repository(state: &AppState) -> ReservationRepository {
    ReservationRepository::new((*state.db).clone())
}

/// POST `/reservations` - Book a stay.
async fn create_reservation(
    State(state): State<AppState>,
    AppJson(draft): AppJson<ReservationDraft>,
) -> ApiResult<(StatusCode, Json<ReservationWithProperty>)> {
    let reservation = repository(&state).create(draft).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET `/reservations` - List reservations, newest check-in first.
async fn list_reservations(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListReservationsQuery>,
) -> ApiResult<Json<Vec<ReservationWithProperty>>> {
    let filter = ReservationFilter {
        property_id: query.property_id,
        desde: query.desde,
        hasta: query.hasta,
        platform: query.platform,
    };
    let page = page_request(query.skip, query.limit);
    Ok(Json(repository(&state).list(filter, page).await?))
}

/// GET `/reservations/calendar` - Calendar events for a window.
async fn calendar(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CalendarQuery>,
) -> ApiResult<Json<Vec<CalendarEvent>>> {
    let today = Utc::now().date_naive();
    let window = resolve_window(query.desde, query.hasta, today)?;
    Ok(Json(
        repository(&state)
            .calendar(window, query.property_id)
            .await?,
    ))
}

/// GET `/reservations/{reservation_id}` - Get a reservation with its property.
async fn get_reservation(
    State(state): State<AppState>,
    AppPath(reservation_id): AppPath<Uuid>,
) -> ApiResult<Json<ReservationWithProperty>> {
    Ok(Json(repository(&state).get(reservation_id).await?))
}

/// PUT `/reservations/{reservation_id}` - Partially update a reservation.
async fn update_reservation(
    State(state): State<AppState>,
    AppPath(reservation_id): AppPath<Uuid>,
    AppJson(patch): AppJson<ReservationPatch>,
) -> ApiResult<Json<ReservationWithProperty>> {
    Ok(Json(repository(&state).update(reservation_id, patch).await?))
}

/// DELETE `/reservations/{reservation_id}` - Delete a reservation.
async fn delete_reservation(
    State(state): State<AppState>,
    AppPath(reservation_id): AppPath<Uuid>,
) -> ApiResult<StatusCode> {
    repository(&state).delete(reservation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Builds a page request, falling back to the defaults.
pub(crate) fn page_request(skip: Option<u64>, limit: Option<u64>) -> PageRequest {
    let defaults = PageRequest::default();
    PageRequest::new(skip.unwrap_or(defaults.skip), limit.unwrap_or(defaults.limit))
}
