//! Cart line-item and payment types

use serde::{Deserialize, Serialize};

/// Accepted payment methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Pix => "pix",
        }
    }
}

/// Payment details recorded on a completed sale
///
/// `change` is only ever present for cash payments tendered above the total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    /// Amount tendered
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
}

/// An add-on attached to a cart line item
///
/// Name and price are captured when the add-on enters the cart, so a later
/// catalog edit cannot alter an in-progress or completed sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartAddon {
    /// Add-on reference ("addon:<key>")
    pub addon_id: String,
    pub name: String,
    pub price: f64,
    /// Multiplier independent of the parent line item's quantity
    pub quantity: i32,
}

/// One cart slot: a product, its quantity, its add-ons, and an optional note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product reference ("product:<key>")
    pub product_id: String,
    pub name: String,
    /// Unit price captured when the item entered the cart
    pub price: f64,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<CartAddon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

/// Add-on selection in an add-to-cart request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAddonInput {
    pub addon_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// Add-to-cart request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub addons: Vec<CartAddonInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Update payload for a cart line item addressed by position
///
/// `addons`/`note` are left unchanged when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Vec<CartAddonInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payment input for checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub method: PaymentMethod,
    pub amount: f64,
}

/// Checkout request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub payment: PaymentInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Pix).unwrap(),
            "\"pix\""
        );
        let m: PaymentMethod = serde_json::from_str("\"cash\"").unwrap();
        assert_eq!(m, PaymentMethod::Cash);
    }

    #[test]
    fn test_cart_item_input_defaults() {
        let input: CartItemInput =
            serde_json::from_str(r#"{"product_id": "product:p1"}"#).unwrap();
        assert_eq!(input.quantity, 1);
        assert!(input.addons.is_empty());
        assert!(input.note.is_none());
    }

    #[test]
    fn test_payment_details_change_omitted_when_absent() {
        let details = PaymentDetails {
            method: PaymentMethod::Card,
            amount: 20.0,
            change: None,
        };
        let json = serde_json::to_string(&details).unwrap();
        assert!(!json.contains("change"));
    }
}
