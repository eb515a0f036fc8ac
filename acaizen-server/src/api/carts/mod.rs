//! Cart API module
//!
//! Per-terminal cart operations and checkout.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/carts/{terminal}", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::view).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route(
            "/items/{index}",
            put(handler::update_item).delete(handler::remove_item),
        )
        .route("/checkout", post(handler::checkout))
}
