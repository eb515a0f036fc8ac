//! Shared types for the Acaizen POS backend
//!
//! Common types used by the server and its API clients: data models,
//! cart/payment types, and the unified error system.

pub mod cart;
pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use cart::{
    CartAddon, CartAddonInput, CartItemInput, CartItemUpdate, CartLineItem, CheckoutRequest,
    PaymentDetails, PaymentInput, PaymentMethod,
};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
