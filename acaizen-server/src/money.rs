//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic runs on `Decimal`; values are converted to `f64`
//! only for storage and serialization.

use crate::cart::CartError;
use rust_decimal::prelude::*;
use shared::cart::{CartLineItem, PaymentInput};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item or add-on
const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for precise arithmetic
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), CartError> {
    if !value.is_finite() {
        return Err(CartError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a line-item quantity (also used for updates)
pub fn validate_quantity(quantity: i32) -> Result<(), CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidInput(format!(
            "quantity must be at least 1, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(CartError::InvalidInput(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Validate a CartLineItem before it enters the cart
pub fn validate_line_item(item: &CartLineItem) -> Result<(), CartError> {
    require_finite(item.price, "price")?;
    if item.price < 0.0 {
        return Err(CartError::InvalidInput(format!(
            "price must be non-negative, got {}",
            item.price
        )));
    }
    if item.price > MAX_PRICE {
        return Err(CartError::InvalidInput(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, item.price
        )));
    }

    validate_quantity(item.quantity)?;

    for addon in &item.addons {
        require_finite(addon.price, "addon price")?;
        if addon.price < 0.0 {
            return Err(CartError::InvalidInput(format!(
                "addon price must be non-negative, got {}",
                addon.price
            )));
        }
        if addon.price > MAX_PRICE {
            return Err(CartError::InvalidInput(format!(
                "addon price exceeds maximum allowed ({}), got {}",
                MAX_PRICE, addon.price
            )));
        }
        if addon.quantity < 1 || addon.quantity > MAX_QUANTITY {
            return Err(CartError::InvalidInput(format!(
                "addon quantity must be between 1 and {}, got {}",
                MAX_QUANTITY, addon.quantity
            )));
        }
    }

    Ok(())
}

/// Validate a PaymentInput before checkout
pub fn validate_payment(payment: &PaymentInput) -> Result<(), CartError> {
    if !payment.amount.is_finite() {
        return Err(CartError::InvalidAmount(format!(
            "amount must be a finite number, got {}",
            payment.amount
        )));
    }
    if payment.amount < 0.0 {
        return Err(CartError::InvalidAmount(format!(
            "amount must be non-negative, got {}",
            payment.amount
        )));
    }
    if payment.amount > MAX_PAYMENT_AMOUNT {
        return Err(CartError::InvalidAmount(format!(
            "amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, payment.amount
        )));
    }
    Ok(())
}

/// Subtotal of one line item: price × quantity + Σ(addon price × addon quantity)
///
/// Add-on quantities are independent multipliers, not scaled by the line
/// item's quantity.
pub fn line_subtotal(item: &CartLineItem) -> Decimal {
    let mut subtotal = to_decimal(item.price) * Decimal::from(item.quantity);
    for addon in &item.addons {
        subtotal += to_decimal(addon.price) * Decimal::from(addon.quantity);
    }
    subtotal
}

/// Total over all line items; recomputed from current state on every read
pub fn cart_total(items: &[CartLineItem]) -> Decimal {
    items.iter().map(line_subtotal).sum()
}

/// Whether `paid` covers `required` (within 0.01 tolerance)
pub fn is_payment_sufficient(paid: f64, required: f64) -> bool {
    to_decimal(paid) >= to_decimal(required) - MONEY_TOLERANCE
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::cart::{CartAddon, PaymentMethod};

    fn item(price: f64, quantity: i32, addons: Vec<CartAddon>) -> CartLineItem {
        CartLineItem {
            product_id: "product:p1".to_string(),
            name: "Açaí Tradicional 300ml".to_string(),
            price,
            quantity,
            addons,
            note: None,
        }
    }

    fn addon(price: f64, quantity: i32) -> CartAddon {
        CartAddon {
            addon_id: "addon:a1".to_string(),
            name: "Granola".to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_line_subtotal_without_addons() {
        assert_eq!(to_f64(line_subtotal(&item(14.90, 2, vec![]))), 29.80);
    }

    #[test]
    fn test_line_subtotal_with_addons() {
        // 14.90 + 2.00*1 + 3.00*2 = 22.90
        let addons = vec![addon(2.00, 1), addon(3.00, 2)];
        assert_eq!(to_f64(line_subtotal(&item(14.90, 1, addons))), 22.90);
    }

    #[test]
    fn test_addon_quantity_independent_of_line_quantity() {
        // Add-on multiplier does not scale with the line quantity:
        // 10.00*3 + 2.00*1 = 32.00
        let addons = vec![addon(2.00, 1)];
        assert_eq!(to_f64(line_subtotal(&item(10.00, 3, addons))), 32.00);
    }

    #[test]
    fn test_cart_total_precision() {
        // Float addition of 14.90*2 + 3.00 would drift; decimal must not
        let items = vec![item(14.90, 2, vec![]), item(3.00, 1, vec![])];
        assert_eq!(to_f64(cart_total(&items)), 32.80);
    }

    #[test]
    fn test_cart_total_empty() {
        assert_eq!(to_f64(cart_total(&[])), 0.0);
    }

    #[test]
    fn test_validate_rejects_non_positive_quantity() {
        assert!(matches!(
            validate_line_item(&item(10.0, 0, vec![])),
            Err(CartError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_line_item(&item(10.0, -3, vec![])),
            Err(CartError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nan_price() {
        assert!(validate_line_item(&item(f64::NAN, 1, vec![])).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_addon() {
        assert!(validate_line_item(&item(10.0, 1, vec![addon(-1.0, 1)])).is_err());
        assert!(validate_line_item(&item(10.0, 1, vec![addon(2.0, 0)])).is_err());
    }

    #[test]
    fn test_validate_payment_bounds() {
        let ok = PaymentInput {
            method: PaymentMethod::Cash,
            amount: 40.0,
        };
        assert!(validate_payment(&ok).is_ok());

        let negative = PaymentInput {
            method: PaymentMethod::Cash,
            amount: -1.0,
        };
        assert!(matches!(
            validate_payment(&negative),
            Err(CartError::InvalidAmount(_))
        ));

        let nan = PaymentInput {
            method: PaymentMethod::Card,
            amount: f64::NAN,
        };
        assert!(validate_payment(&nan).is_err());
    }

    #[test]
    fn test_payment_sufficiency_tolerance() {
        assert!(is_payment_sufficient(32.80, 32.80));
        assert!(is_payment_sufficient(32.795, 32.80));
        assert!(!is_payment_sufficient(10.00, 32.80));
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(0.1 + 0.2, 0.3));
        assert!(!money_eq(32.80, 32.82));
    }
}
