//! Cart and payment types
//!
//! Line items, add-on selections, and payment structures shared between the
//! cart aggregator, the sale finalizer, and persisted sale records.

mod types;

pub use types::{
    CartAddon, CartAddonInput, CartItemInput, CartItemUpdate, CartLineItem, CheckoutRequest,
    PaymentDetails, PaymentInput, PaymentMethod,
};
