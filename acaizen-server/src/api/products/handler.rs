//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{CategoryRepository, ProductRepository};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCreate, ProductUpdate};

/// GET /api/products - list all products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/products/by-category/{category_id} - products of one category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.find_by_category(&category_id).await?))
}

/// GET /api/products/{id} - fetch one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
    })?;
    Ok(Json(product))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let categories = CategoryRepository::new(state.db.clone());
    if categories.find_by_id(&data.category).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {} not found", data.category),
        ));
    }

    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.create(data).await?))
}

/// PUT /api/products/{id} - update a product (admin stock set included)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(category) = &data.category {
        let categories = CategoryRepository::new(state.db.clone());
        if categories.find_by_id(category).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("Category {} not found", category),
            ));
        }
    }

    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, data).await?))
}

/// DELETE /api/products/{id} - delete a product
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
