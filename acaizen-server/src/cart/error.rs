//! Cart and checkout error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by the cart aggregator and the sale finalizer
///
/// Every failure is a returned value the caller must handle; none are fatal.
#[derive(Debug, Error)]
pub enum CartError {
    /// Caller supplied a malformed line item or a non-positive quantity
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Index-based operation referenced a non-existent slot
    #[error("no line item at index {index} (cart has {len} items)")]
    OutOfRange { index: usize, len: usize },

    /// Checkout attempted with no items
    #[error("cart is empty")]
    EmptyCart,

    /// Tendered amount below the cart total
    #[error("payment insufficient: tendered {tendered:.2}, required {required:.2}")]
    InsufficientPayment { tendered: f64, required: f64 },

    /// Payment amount is not a valid monetary value
    #[error("invalid payment amount: {0}")]
    InvalidAmount(String),

    /// The catalog/persistence collaborator failed to store the sale
    #[error("sale persistence failed: {0}")]
    Persistence(String),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let code = match &err {
            CartError::InvalidInput(_) => ErrorCode::ValidationFailed,
            CartError::OutOfRange { .. } => ErrorCode::CartItemNotFound,
            CartError::EmptyCart => ErrorCode::CartEmpty,
            CartError::InsufficientPayment { .. } => ErrorCode::PaymentInsufficient,
            CartError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            CartError::Persistence(_) => ErrorCode::PersistenceFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}
