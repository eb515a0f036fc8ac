//! Sale Model
//!
//! A sale is the immutable record of one completed checkout. It carries a
//! deep copy of the cart's line items, so later cart or catalog mutation can
//! never alter a stored sale.

use crate::cart::{CartLineItem, PaymentDetails};
use serde::{Deserialize, Serialize};

/// Completed sale record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: String,
    pub items: Vec<CartLineItem>,
    pub total: f64,
    pub payment: PaymentDetails,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// Payload for storing a new sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleInput {
    pub items: Vec<CartLineItem>,
    pub total: f64,
    pub payment: PaymentDetails,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

impl SaleInput {
    /// Validate the record before it crosses the persistence boundary
    ///
    /// Malformed records must never be stored; the caller maps a failure to a
    /// persistence error.
    pub fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("sale must contain at least one line item".to_string());
        }
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(format!("sale total must be non-negative, got {}", self.total));
        }
        if !self.payment.amount.is_finite() || self.payment.amount < 0.0 {
            return Err(format!(
                "payment amount must be non-negative, got {}",
                self.payment.amount
            ));
        }
        if let Some(change) = self.payment.change {
            if !change.is_finite() || change < 0.0 {
                return Err(format!("change must be non-negative, got {}", change));
            }
        }
        for (i, item) in self.items.iter().enumerate() {
            if item.quantity < 1 {
                return Err(format!(
                    "line item {} has non-positive quantity {}",
                    i, item.quantity
                ));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(format!("line item {} has invalid price {}", i, item.price));
            }
            for addon in &item.addons {
                if addon.quantity < 1 {
                    return Err(format!(
                        "line item {} has add-on with non-positive quantity {}",
                        i, addon.quantity
                    ));
                }
                if !addon.price.is_finite() || addon.price < 0.0 {
                    return Err(format!(
                        "line item {} has add-on with invalid price {}",
                        i, addon.price
                    ));
                }
            }
        }
        if chrono::DateTime::parse_from_rfc3339(&self.created_at).is_err() {
            return Err(format!("created_at is not RFC 3339: {}", self.created_at));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PaymentMethod;

    fn line_item(quantity: i32) -> CartLineItem {
        CartLineItem {
            product_id: "product:p1".to_string(),
            name: "Água Mineral".to_string(),
            price: 3.0,
            quantity,
            addons: Vec::new(),
            note: None,
        }
    }

    fn sale_input(items: Vec<CartLineItem>) -> SaleInput {
        SaleInput {
            items,
            total: 3.0,
            payment: PaymentDetails {
                method: PaymentMethod::Cash,
                amount: 5.0,
                change: Some(2.0),
            },
            created_at: "2025-03-14T12:30:00+00:00".to_string(),
            customer_name: None,
        }
    }

    #[test]
    fn test_valid_sale_passes() {
        assert!(sale_input(vec![line_item(1)]).validate().is_ok());
    }

    #[test]
    fn test_empty_items_rejected() {
        assert!(sale_input(vec![]).validate().is_err());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert!(sale_input(vec![line_item(0)]).validate().is_err());
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let mut input = sale_input(vec![line_item(1)]);
        input.created_at = "14/03/2025 12:30".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_nan_total_rejected() {
        let mut input = sale_input(vec![line_item(1)]);
        input.total = f64::NAN;
        assert!(input.validate().is_err());
    }
}
