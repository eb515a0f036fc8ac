//! Cart API Handlers
//!
//! The cart itself lives in memory (one per terminal); these handlers
//! resolve catalog references at add time so each line item carries a price
//! snapshot, then delegate to the aggregator and the finalizer.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::cart::{Cart, CartError};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::cart::{
    CartAddon, CartAddonInput, CartItemInput, CartItemUpdate, CartLineItem, CheckoutRequest,
};
use shared::models::{Product, Sale};

/// Cart contents plus the derived total
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    pub total: f64,
}

impl CartView {
    fn of(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total: cart.total(),
        }
    }
}

/// Resolve add-on selections against the catalog, enforcing eligibility
///
/// `product` is `None` when the catalog no longer knows the product (stale
/// cart); the category restriction is then unverifiable and skipped.
async fn resolve_addons(
    state: &ServerState,
    product: Option<&Product>,
    selections: &[CartAddonInput],
) -> Result<Vec<CartAddon>, AppError> {
    let mut addons = Vec::with_capacity(selections.len());
    for selection in selections {
        let addon = state
            .catalog
            .addon(&selection.addon_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::AddonNotFound,
                    format!("Add-on {} not found", selection.addon_id),
                )
            })?;
        if let Some(product) = product
            && !addon.eligible_for(product)
        {
            return Err(AppError::with_message(
                ErrorCode::AddonNotEligible,
                format!("Add-on {} is not available for {}", addon.name, product.name),
            ));
        }
        addons.push(CartAddon {
            addon_id: addon.id,
            name: addon.name,
            price: addon.price,
            quantity: selection.quantity,
        });
    }
    Ok(addons)
}

/// Build a line item from an add request, snapshotting catalog prices
async fn resolve_line_item(
    state: &ServerState,
    input: &CartItemInput,
) -> Result<CartLineItem, AppError> {
    let product = state
        .catalog
        .product(&input.product_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", input.product_id),
            )
        })?;

    let addons = resolve_addons(state, Some(&product), &input.addons).await?;

    Ok(CartLineItem {
        product_id: product.id,
        name: product.name,
        price: product.price,
        quantity: input.quantity,
        addons,
        note: input.note.clone(),
    })
}

/// GET /api/carts/{terminal} - current cart contents and total
pub async fn view(
    State(state): State<ServerState>,
    Path(terminal): Path<String>,
) -> AppResult<Json<CartView>> {
    let cart = state.carts.cart(&terminal);
    let cart = cart.lock().await;
    Ok(Json(CartView::of(&cart)))
}

/// POST /api/carts/{terminal}/items - add a line item (merges equal slots)
pub async fn add_item(
    State(state): State<ServerState>,
    Path(terminal): Path<String>,
    Json(input): Json<CartItemInput>,
) -> AppResult<Json<CartView>> {
    let item = resolve_line_item(&state, &input).await?;

    let cart = state.carts.cart(&terminal);
    let mut cart = cart.lock().await;
    cart.add_item(item)?;
    Ok(Json(CartView::of(&cart)))
}

/// PUT /api/carts/{terminal}/items/{index} - update a line item in place
pub async fn update_item(
    State(state): State<ServerState>,
    Path((terminal, index)): Path<(String, usize)>,
    Json(update): Json<CartItemUpdate>,
) -> AppResult<Json<CartView>> {
    let cart = state.carts.cart(&terminal);
    let mut cart = cart.lock().await;

    let addons = match &update.addons {
        Some(selections) => {
            let item = cart
                .items()
                .get(index)
                .ok_or(CartError::OutOfRange {
                    index,
                    len: cart.len(),
                })
                .map_err(AppError::from)?;
            let product = state.catalog.product(&item.product_id).await?;
            Some(resolve_addons(&state, product.as_ref(), selections).await?)
        }
        None => None,
    };

    cart.update_item(index, update.quantity, addons, update.note.clone())?;
    Ok(Json(CartView::of(&cart)))
}

/// DELETE /api/carts/{terminal}/items/{index} - remove a line item
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((terminal, index)): Path<(String, usize)>,
) -> AppResult<Json<CartView>> {
    let cart = state.carts.cart(&terminal);
    let mut cart = cart.lock().await;
    cart.remove_item(index)?;
    Ok(Json(CartView::of(&cart)))
}

/// DELETE /api/carts/{terminal} - clear the cart
pub async fn clear(
    State(state): State<ServerState>,
    Path(terminal): Path<String>,
) -> AppResult<Json<CartView>> {
    let cart = state.carts.cart(&terminal);
    let mut cart = cart.lock().await;
    cart.clear();
    Ok(Json(CartView::of(&cart)))
}

/// POST /api/carts/{terminal}/checkout - finalize the sale
///
/// The cart lock is held across the persistence calls, so one terminal can
/// never double-submit a checkout.
pub async fn checkout(
    State(state): State<ServerState>,
    Path(terminal): Path<String>,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<Json<Sale>> {
    let cart = state.carts.cart(&terminal);
    let mut cart = cart.lock().await;
    let sale = state
        .finalizer
        .complete_sale(&mut cart, request.payment, request.customer_name)
        .await?;
    Ok(Json(sale))
}
