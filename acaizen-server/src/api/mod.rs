//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`products`] - product management
//! - [`categories`] - category management
//! - [`addons`] - add-on management
//! - [`employees`] - employee management
//! - [`carts`] - per-terminal carts and checkout
//! - [`sales`] - sale records (receipt lookup)
//! - [`reports`] - sales reporting

pub mod addons;
pub mod carts;
pub mod categories;
pub mod employees;
pub mod health;
pub mod products;
pub mod reports;
pub mod sales;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(addons::router())
        .merge(employees::router())
        .merge(carts::router())
        .merge(sales::router())
        .merge(reports::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
