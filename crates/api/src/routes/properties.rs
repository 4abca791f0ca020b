//! Property management routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use staybook_db::entities::properties;
use staybook_db::repositories::{CreatePropertyInput, PropertyRepository, UpdatePropertyInput};
use staybook_shared::types::PageRequest;
use uuid::Uuid;

use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::{ApiResult, AppState};

/// Creates the property routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route(
            "/properties/{property_id}",
            get(get_property).put(update_property).delete(delete_property),
        )
}

fn repository(state: &AppState) -> PropertyRepository {
    PropertyRepository::new((*state.db).clone())
}

/// POST `/properties` - Create a property.
async fn create_property(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePropertyInput>,
) -> ApiResult<(StatusCode, Json<properties::Model>)> {
    let property = repository(&state).create(payload).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// GET `/properties` - List properties by name.
async fn list_properties(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageRequest>,
) -> ApiResult<Json<Vec<properties::Model>>> {
    Ok(Json(repository(&state).list(page).await?))
}

/// GET `/properties/{property_id}` - Get a property.
async fn get_property(
    State(state): State<AppState>,
    AppPath(property_id): AppPath<Uuid>,
) -> ApiResult<Json<properties::Model>> {
    Ok(Json(repository(&state).get(property_id).await?))
}

/// PUT `/properties/{property_id}` - Partially update a property.
async fn update_property(
    State(state): State<AppState>,
    AppPath(property_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdatePropertyInput>,
) -> ApiResult<Json<properties::Model>> {
    Ok(Json(repository(&state).update(property_id, payload).await?))
}

/// DELETE `/properties/{property_id}` - Delete a property without reservations.
async fn delete_property(
    State(state): State<AppState>,
    AppPath(property_id): AppPath<Uuid>,
) -> ApiResult<StatusCode> {
    repository(&state).delete(property_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
