use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use service::category::{
    Category, CategoryChanges, CategoryId, CategoryNode, CategoryStatistics, MoveCategory, NewCategory,
};
use service::leaf_record::LeafRecord;

use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildrenQuery {
    pub max_depth: Option<u32>,
}

/// `?parentId=`; absent means move to the root level.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveQuery {
    pub parent_id: Option<CategoryId>,
}

#[utoipa::path(post, path = "/service-categories", tag = "categories",
    request_body = crate::openapi::NewCategoryDoc,
    responses((status = 201, description = "Created", body = crate::openapi::CategoryDoc), (status = 400, description = "Invalid name"), (status = 404, description = "Parent not found"), (status = 409, description = "Duplicate name")))]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let created = state.categories.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/service-categories", tag = "categories",
    responses((status = 200, description = "All categories, flat", body = [crate::openapi::CategoryDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories.list().await?))
}

#[utoipa::path(get, path = "/service-categories/roots", tag = "categories",
    responses((status = 200, description = "Root categories with direct children", body = [crate::openapi::CategoryNodeDoc])))]
pub async fn roots(State(state): State<AppState>) -> Result<Json<Vec<CategoryNode>>, ApiError> {
    Ok(Json(state.categories.list_roots().await?))
}

#[utoipa::path(get, path = "/service-categories/tree", tag = "categories",
    responses((status = 200, description = "Whole forest", body = [crate::openapi::CategoryNodeDoc])))]
pub async fn tree(State(state): State<AppState>) -> Result<Json<Vec<CategoryNode>>, ApiError> {
    Ok(Json(state.categories.tree().await?))
}

#[utoipa::path(get, path = "/service-categories/statistics", tag = "categories",
    responses((status = 200, description = "Tree statistics", body = crate::openapi::CategoryStatisticsDoc)))]
pub async fn statistics(State(state): State<AppState>) -> Result<Json<CategoryStatistics>, ApiError> {
    Ok(Json(state.categories.statistics().await?))
}

#[utoipa::path(get, path = "/service-categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "Category with services and direct children", body = crate::openapi::CategoryNodeDoc), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<AppState>, AppPath(id): AppPath<CategoryId>) -> Result<Json<CategoryNode>, ApiError> {
    Ok(Json(state.categories.get(id).await?))
}

#[utoipa::path(get, path = "/service-categories/{id}/with-children", tag = "categories",
    params(("id" = i32, Path, description = "Category id"), ("maxDepth" = Option<u32>, Query, description = "Levels below the node to load")),
    responses((status = 200, description = "Subtree", body = crate::openapi::CategoryNodeDoc), (status = 404, description = "Not found")))]
pub async fn with_children(
    State(state): State<AppState>,
    AppPath(id): AppPath<CategoryId>,
    AppQuery(q): AppQuery<ChildrenQuery>,
) -> Result<Json<CategoryNode>, ApiError> {
    Ok(Json(state.categories.get_with_children(id, q.max_depth).await?))
}

#[utoipa::path(get, path = "/service-categories/{id}/services", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "Services of the category", body = [crate::openapi::LeafRecordDoc]), (status = 404, description = "Not found")))]
pub async fn services(State(state): State<AppState>, AppPath(id): AppPath<CategoryId>) -> Result<Json<Vec<LeafRecord>>, ApiError> {
    Ok(Json(state.categories.services_of(id).await?))
}

#[utoipa::path(patch, path = "/service-categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = crate::openapi::CategoryChangesDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::CategoryDoc), (status = 400, description = "Invalid change"), (status = 404, description = "Not found"), (status = 409, description = "Duplicate name")))]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<CategoryId>,
    AppJson(changes): AppJson<CategoryChanges>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.categories.update(id, changes).await?))
}

#[utoipa::path(post, path = "/service-categories/{id}/move", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = crate::openapi::MoveCategoryDoc,
    responses((status = 200, description = "Moved", body = crate::openapi::CategoryDoc), (status = 400, description = "Self parent or circular reference"), (status = 404, description = "Not found"), (status = 409, description = "Duplicate name")))]
pub async fn move_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<CategoryId>,
    AppJson(input): AppJson<MoveCategory>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.categories.move_category(id, input.parent_id).await?))
}

#[utoipa::path(patch, path = "/service-categories/{id}/move", tag = "categories",
    params(("id" = i32, Path, description = "Category id"), ("parentId" = Option<i32>, Query, description = "New parent; absent moves to the root level")),
    responses((status = 200, description = "Moved", body = crate::openapi::CategoryDoc), (status = 400, description = "Self parent or circular reference"), (status = 404, description = "Not found"), (status = 409, description = "Duplicate name")))]
pub async fn move_by_query(
    State(state): State<AppState>,
    AppPath(id): AppPath<CategoryId>,
    AppQuery(q): AppQuery<MoveQuery>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.categories.move_category(id, q.parent_id).await?))
}

#[utoipa::path(delete, path = "/service-categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 204, description = "Deleted"), (status = 400, description = "Has children"), (status = 404, description = "Not found"), (status = 409, description = "Still referenced by services")))]
pub async fn delete(State(state): State<AppState>, AppPath(id): AppPath<CategoryId>) -> Result<StatusCode, ApiError> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
