//! Sales API Handlers
//!
//! Read-only: sales are created by checkout and never mutated.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::SaleRepository;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::cart::PaymentMethod;
use shared::models::Sale;

/// Query filters for listing sales
#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    /// Inclusive RFC 3339 lower bound
    pub start: Option<String>,
    /// Inclusive RFC 3339 upper bound
    pub end: Option<String>,
    pub method: Option<PaymentMethod>,
}

/// GET /api/sales - list sales, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    let repo = SaleRepository::new(state.db.clone());
    Ok(Json(
        repo.find_filtered(query.start, query.end, query.method)
            .await?,
    ))
}

/// GET /api/sales/{id} - fetch one sale (receipt view)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Sale>> {
    let repo = SaleRepository::new(state.db.clone());
    let sale = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::SaleNotFound, format!("Sale {} not found", id))
    })?;
    Ok(Json(sale))
}
