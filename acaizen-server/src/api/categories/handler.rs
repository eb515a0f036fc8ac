//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{CategoryRepository, ProductRepository};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

/// GET /api/categories - list all categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/categories/{id} - fetch one category
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {} not found", id),
        )
    })?;
    Ok(Json(category))
}

/// POST /api/categories - create a category
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    Ok(Json(repo.create(data).await?))
}

/// PUT /api/categories/{id} - rename a category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, data).await?))
}

/// DELETE /api/categories/{id} - delete a category
///
/// Refused while products still reference it.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let products = ProductRepository::new(state.db.clone());
    let in_use = products.count_by_category(&id).await?;
    if in_use > 0 {
        return Err(AppError::with_message(
            ErrorCode::CategoryHasProducts,
            format!("Category {} still has {} products", id, in_use),
        ));
    }

    let repo = CategoryRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
