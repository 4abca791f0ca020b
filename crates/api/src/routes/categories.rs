//! Category management routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;
use staybook_core::ledger::MovementType;
use staybook_db::entities::categories;
use staybook_db::repositories::{CategoryRepository, CreateCategoryInput, UpdateCategoryInput};
use uuid::Uuid;

use super::reservations::page_request;
use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::{ApiResult, AppState};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{category_id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// Query parameters for listing categories.
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    /// Only categories of this type.
    pub movement_type: Option<MovementType>,
    /// Rows to skip.
    pub skip: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
}

fn repository(state: &AppState) -> CategoryRepository {
    CategoryRepository::new((*state.db).clone())
}

/// POST `/categories` - Create a category.
async fn create_category(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCategoryInput>,
) -> ApiResult<(StatusCode, Json<categories::Model>)> {
    let category = repository(&state).create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET `/categories` - List categories by name.
async fn list_categories(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListCategoriesQuery>,
) -> ApiResult<Json<Vec<categories::Model>>> {
    let page = page_request(query.skip, query.limit);
    Ok(Json(
        repository(&state).list(query.movement_type, page).await?,
    ))
}

/// GET `/categories/{category_id}` - Get a category.
async fn get_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<Uuid>,
) -> ApiResult<Json<categories::Model>> {
    Ok(Json(repository(&state).get(category_id).await?))
}

/// PUT `/categories/{category_id}` - Partially update a category.
async fn update_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateCategoryInput>,
) -> ApiResult<Json<categories::Model>> {
    Ok(Json(repository(&state).update(category_id, payload).await?))
}

/// DELETE `/categories/{category_id}` - Delete an unused category.
async fn delete_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<Uuid>,
) -> ApiResult<StatusCode> {
    repository(&state).delete(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
