//! Add-on API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{AddonRepository, ProductRepository};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Addon, AddonCreate, AddonUpdate};

/// GET /api/addons - list all add-ons
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Addon>>> {
    let repo = AddonRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/addons/for-product/{product_id} - add-ons eligible for a product
///
/// An add-on restricted to a category only applies to products of that
/// category; unrestricted add-ons apply to everything.
pub async fn list_for_product(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<Addon>>> {
    let products = ProductRepository::new(state.db.clone());
    let product = products.find_by_id(&product_id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("Product {} not found", product_id),
        )
    })?;

    let repo = AddonRepository::new(state.db.clone());
    let addons = repo
        .find_all()
        .await?
        .into_iter()
        .filter(|addon| addon.eligible_for(&product))
        .collect();
    Ok(Json(addons))
}

/// GET /api/addons/{id} - fetch one add-on
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Addon>> {
    let repo = AddonRepository::new(state.db.clone());
    let addon = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::AddonNotFound, format!("Add-on {} not found", id))
    })?;
    Ok(Json(addon))
}

/// POST /api/addons - create an add-on
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<AddonCreate>,
) -> AppResult<Json<Addon>> {
    let repo = AddonRepository::new(state.db.clone());
    Ok(Json(repo.create(data).await?))
}

/// PUT /api/addons/{id} - update an add-on
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<AddonUpdate>,
) -> AppResult<Json<Addon>> {
    let repo = AddonRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, data).await?))
}

/// DELETE /api/addons/{id} - delete an add-on
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = AddonRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
