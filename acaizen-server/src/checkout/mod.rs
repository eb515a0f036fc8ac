//! Sale Finalizer
//!
//! Converts an in-progress cart plus payment input into one persisted,
//! immutable sale, with inventory side effects.
//!
//! # Flow
//!
//! ```text
//! complete_sale(cart, payment, customer_name)
//!     ├─ 1. Reject empty carts and malformed payment input
//!     ├─ 2. Compute the authoritative total (same arithmetic as Cart::total)
//!     ├─ 3. Validate payment sufficiency; compute change for cash
//!     ├─ 4. Persist the sale snapshot
//!     ├─ 5. Decrement stock per product, floored at zero
//!     ├─ 6. Clear the cart
//!     └─ 7. Return the stored sale
//! ```
//!
//! Atomicity: if the sale write fails, nothing is observable. The cart keeps
//! its items and no stock is touched. Once the sale has committed, a stock
//! decrement failure is reported as a warning only; the sale record always
//! wins over the stock count.

use std::sync::Arc;

use chrono::Utc;
use shared::cart::{CartLineItem, PaymentDetails, PaymentInput, PaymentMethod};
use shared::models::{Sale, SaleInput};

use crate::cart::{Cart, CartError};
use crate::catalog::CatalogStore;
use crate::money;

/// Finalizes carts into persisted sales
///
/// The catalog/persistence dependency is constructor-injected; tests swap in
/// an in-memory implementation.
pub struct SaleFinalizer {
    catalog: Arc<dyn CatalogStore>,
}

impl SaleFinalizer {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Complete the sale for the given cart
    pub async fn complete_sale(
        &self,
        cart: &mut Cart,
        payment: PaymentInput,
        customer_name: Option<String>,
    ) -> Result<Sale, CartError> {
        if cart.is_empty() {
            return Err(CartError::EmptyCart);
        }
        money::validate_payment(&payment)?;

        let total = money::cart_total(cart.items());
        let total_f64 = money::to_f64(total);
        if !money::is_payment_sufficient(payment.amount, total_f64) {
            return Err(CartError::InsufficientPayment {
                tendered: payment.amount,
                required: total_f64,
            });
        }

        // Change only for cash tendered strictly above the total; card and
        // pix settle exactly regardless of the entered amount
        let amount = money::to_decimal(payment.amount);
        let change = match payment.method {
            PaymentMethod::Cash if amount > total => Some(money::to_f64(amount - total)),
            _ => None,
        };

        let input = SaleInput {
            items: cart.items().to_vec(),
            total: total_f64,
            payment: PaymentDetails {
                method: payment.method,
                amount: payment.amount,
                change,
            },
            created_at: Utc::now().to_rfc3339(),
            customer_name,
        };

        let sale = self
            .catalog
            .create_sale(input)
            .await
            .map_err(|e| CartError::Persistence(e.to_string()))?;

        // The sale is committed; decrements are independent updates and a
        // failure here must not unwind it
        for (product_id, sold) in sold_quantities(cart.items()) {
            if let Err(e) = self.catalog.decrement_stock(&product_id, sold).await {
                tracing::warn!(
                    product_id = %product_id,
                    sold,
                    error = %e,
                    "stock decrement failed after sale commit"
                );
            }
        }

        cart.clear();

        tracing::info!(
            sale_id = %sale.id,
            total = sale.total,
            method = payment.method.as_str(),
            "sale completed"
        );
        Ok(sale)
    }
}

/// Sum sold quantity per distinct product, in first-seen order
fn sold_quantities(items: &[CartLineItem]) -> Vec<(String, i64)> {
    let mut totals: Vec<(String, i64)> = Vec::new();
    for item in items {
        match totals.iter_mut().find(|(id, _)| *id == item.product_id) {
            Some((_, sold)) => *sold += i64::from(item.quantity),
            None => totals.push((item.product_id.clone(), i64::from(item.quantity))),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::models::{Addon, Category, Product};
    use std::collections::HashMap;

    /// In-memory catalog with failure injection
    #[derive(Default)]
    struct MockCatalog {
        products: Mutex<HashMap<String, Product>>,
        sales: Mutex<Vec<Sale>>,
        stock_calls: Mutex<Vec<(String, i64)>>,
        fail_create_sale: bool,
        fail_decrement_for: Option<String>,
    }

    impl MockCatalog {
        fn with_product(self, id: &str, stock: i64) -> Self {
            self.products.lock().insert(
                id.to_string(),
                Product {
                    id: id.to_string(),
                    name: id.to_string(),
                    price: 10.0,
                    category: "category:acai".to_string(),
                    description: String::new(),
                    image: None,
                    stock,
                },
            );
            self
        }

        fn stock_of(&self, id: &str) -> i64 {
            self.products.lock().get(id).map(|p| p.stock).unwrap_or(-1)
        }

        fn sale_count(&self) -> usize {
            self.sales.lock().len()
        }
    }

    #[async_trait]
    impl CatalogStore for MockCatalog {
        async fn products(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.products.lock().values().cloned().collect())
        }

        async fn product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
            Ok(self.products.lock().get(id).cloned())
        }

        async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
            Ok(Vec::new())
        }

        async fn addons(&self) -> Result<Vec<Addon>, CatalogError> {
            Ok(Vec::new())
        }

        async fn addon(&self, _id: &str) -> Result<Option<Addon>, CatalogError> {
            Ok(None)
        }

        async fn create_sale(&self, input: SaleInput) -> Result<Sale, CatalogError> {
            if self.fail_create_sale {
                return Err(CatalogError::Storage("backend unavailable".to_string()));
            }
            input.validate().map_err(CatalogError::InvalidRecord)?;
            let sale = Sale {
                id: format!("sale:{}", self.sales.lock().len() + 1),
                items: input.items,
                total: input.total,
                payment: input.payment,
                created_at: input.created_at,
                customer_name: input.customer_name,
            };
            self.sales.lock().push(sale.clone());
            Ok(sale)
        }

        async fn decrement_stock(
            &self,
            product_id: &str,
            sold: i64,
        ) -> Result<Product, CatalogError> {
            self.stock_calls
                .lock()
                .push((product_id.to_string(), sold));
            if self.fail_decrement_for.as_deref() == Some(product_id) {
                return Err(CatalogError::Storage("stock write failed".to_string()));
            }
            let mut products = self.products.lock();
            let product = products
                .get_mut(product_id)
                .ok_or_else(|| CatalogError::NotFound(format!("Product {}", product_id)))?;
            product.stock = (product.stock - sold).max(0);
            Ok(product.clone())
        }

        async fn sale(&self, id: &str) -> Result<Option<Sale>, CatalogError> {
            Ok(self.sales.lock().iter().find(|s| s.id == id).cloned())
        }
    }

    fn line_item(product_id: &str, price: f64, quantity: i32) -> CartLineItem {
        CartLineItem {
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            price,
            quantity,
            addons: Vec::new(),
            note: None,
        }
    }

    fn cash(amount: f64) -> PaymentInput {
        PaymentInput {
            method: PaymentMethod::Cash,
            amount,
        }
    }

    fn example_cart() -> Cart {
        // Açaí 300ml × 2 @ 14.90 + Água @ 3.00 (sem gás) = 32.80
        let mut cart = Cart::new();
        cart.add_item(line_item("product:acai", 14.90, 2)).unwrap();
        let mut agua = line_item("product:agua", 3.00, 1);
        agua.note = Some("sem gás".to_string());
        cart.add_item(agua).unwrap();
        cart
    }

    #[tokio::test]
    async fn test_cash_sale_with_change() {
        let catalog = Arc::new(
            MockCatalog::default()
                .with_product("product:acai", 100)
                .with_product("product:agua", 50),
        );
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = example_cart();

        let sale = finalizer
            .complete_sale(&mut cart, cash(40.00), None)
            .await
            .unwrap();

        assert_eq!(sale.total, 32.80);
        assert_eq!(sale.payment.amount, 40.00);
        assert_eq!(sale.payment.change, Some(7.20));
        assert_eq!(sale.items.len(), 2);
        assert!(cart.is_empty());
        assert_eq!(catalog.stock_of("product:acai"), 98);
        assert_eq!(catalog.stock_of("product:agua"), 49);
    }

    #[tokio::test]
    async fn test_exact_cash_has_no_change() {
        let catalog = Arc::new(MockCatalog::default().with_product("product:acai", 10));
        let finalizer = SaleFinalizer::new(catalog);
        let mut cart = Cart::new();
        cart.add_item(line_item("product:acai", 14.90, 2)).unwrap();

        let sale = finalizer
            .complete_sale(&mut cart, cash(29.80), None)
            .await
            .unwrap();

        assert_eq!(sale.payment.change, None);
    }

    #[tokio::test]
    async fn test_card_and_pix_never_yield_change() {
        for method in [PaymentMethod::Card, PaymentMethod::Pix] {
            let catalog = Arc::new(MockCatalog::default().with_product("product:acai", 10));
            let finalizer = SaleFinalizer::new(catalog);
            let mut cart = Cart::new();
            cart.add_item(line_item("product:acai", 14.90, 1)).unwrap();

            let sale = finalizer
                .complete_sale(
                    &mut cart,
                    PaymentInput {
                        method,
                        amount: 50.00,
                    },
                    None,
                )
                .await
                .unwrap();

            assert_eq!(sale.payment.change, None);
            assert_eq!(sale.payment.method, method);
        }
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_without_side_effects() {
        let catalog = Arc::new(MockCatalog::default());
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = Cart::new();

        let result = finalizer.complete_sale(&mut cart, cash(10.00), None).await;

        assert!(matches!(result, Err(CartError::EmptyCart)));
        assert_eq!(catalog.sale_count(), 0);
        assert!(catalog.stock_calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_payment_keeps_cart() {
        let catalog = Arc::new(
            MockCatalog::default()
                .with_product("product:acai", 100)
                .with_product("product:agua", 50),
        );
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = example_cart();

        let result = finalizer.complete_sale(&mut cart, cash(10.00), None).await;

        match result {
            Err(CartError::InsufficientPayment { tendered, required }) => {
                assert_eq!(tendered, 10.00);
                assert_eq!(required, 32.80);
            }
            other => panic!("expected InsufficientPayment, got {:?}", other.map(|s| s.id)),
        }
        // Cart retained so the cashier can correct the amount
        assert_eq!(cart.len(), 2);
        assert_eq!(catalog.sale_count(), 0);
        assert!(catalog.stock_calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_atomic() {
        let catalog = Arc::new(MockCatalog {
            fail_create_sale: true,
            ..Default::default()
        });
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = example_cart();
        let items_before = cart.items().to_vec();

        let result = finalizer.complete_sale(&mut cart, cash(40.00), None).await;

        assert!(matches!(result, Err(CartError::Persistence(_))));
        // Cart unchanged: same line items, same order
        assert_eq!(cart.items(), items_before.as_slice());
        // No stock update was attempted
        assert!(catalog.stock_calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_stock_floors_at_zero() {
        let catalog = Arc::new(MockCatalog::default().with_product("product:acai", 1));
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = Cart::new();
        cart.add_item(line_item("product:acai", 14.90, 5)).unwrap();

        finalizer
            .complete_sale(&mut cart, cash(100.00), None)
            .await
            .unwrap();

        assert_eq!(catalog.stock_of("product:acai"), 0);
    }

    #[tokio::test]
    async fn test_merged_lines_decrement_once_per_product() {
        let catalog = Arc::new(MockCatalog::default().with_product("product:acai", 100));
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = Cart::new();
        cart.add_item(line_item("product:acai", 14.90, 2)).unwrap();
        let mut noted = line_item("product:acai", 14.90, 3);
        noted.note = Some("sem granola".to_string());
        cart.add_item(noted).unwrap();

        finalizer
            .complete_sale(&mut cart, cash(200.00), None)
            .await
            .unwrap();

        // Two distinct slots, one summed decrement
        let calls = catalog.stock_calls.lock().clone();
        assert_eq!(calls, vec![("product:acai".to_string(), 5)]);
        assert_eq!(catalog.stock_of("product:acai"), 95);
    }

    #[tokio::test]
    async fn test_partial_stock_failure_keeps_sale() {
        let catalog = Arc::new(MockCatalog {
            fail_decrement_for: Some("product:acai".to_string()),
            ..Default::default()
        });
        catalog.products.lock().insert(
            "product:agua".to_string(),
            Product {
                id: "product:agua".to_string(),
                name: "Água Mineral".to_string(),
                price: 3.0,
                category: "category:bebidas".to_string(),
                description: String::new(),
                image: None,
                stock: 50,
            },
        );
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = example_cart();

        // The failed decrement is non-fatal: the sale stands, the cart clears,
        // and the other product's stock is still updated
        let sale = finalizer
            .complete_sale(&mut cart, cash(40.00), None)
            .await
            .unwrap();

        assert_eq!(catalog.sale_count(), 1);
        assert_eq!(sale.total, 32.80);
        assert!(cart.is_empty());
        assert_eq!(catalog.stock_of("product:agua"), 49);
    }

    #[tokio::test]
    async fn test_customer_name_recorded() {
        let catalog = Arc::new(MockCatalog::default().with_product("product:acai", 10));
        let finalizer = SaleFinalizer::new(catalog);
        let mut cart = Cart::new();
        cart.add_item(line_item("product:acai", 14.90, 1)).unwrap();

        let sale = finalizer
            .complete_sale(&mut cart, cash(20.00), Some("Mariana".to_string()))
            .await
            .unwrap();

        assert_eq!(sale.customer_name.as_deref(), Some("Mariana"));
        assert!(chrono::DateTime::parse_from_rfc3339(&sale.created_at).is_ok());
    }

    #[tokio::test]
    async fn test_sale_snapshot_is_isolated_from_cart() {
        let catalog = Arc::new(MockCatalog::default().with_product("product:acai", 10));
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = Cart::new();
        cart.add_item(line_item("product:acai", 14.90, 1)).unwrap();

        let sale = finalizer
            .complete_sale(&mut cart, cash(20.00), None)
            .await
            .unwrap();

        // Later cart mutation cannot retroactively alter the completed sale
        cart.add_item(line_item("product:agua", 3.00, 4)).unwrap();
        let stored = catalog.sale("sale:1").await.unwrap().unwrap();
        assert_eq!(stored.items, sale.items);
        assert_eq!(stored.items.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_payment_amount_rejected() {
        let catalog = Arc::new(MockCatalog::default());
        let finalizer = SaleFinalizer::new(catalog.clone());
        let mut cart = Cart::new();
        cart.add_item(line_item("product:acai", 14.90, 1)).unwrap();

        let result = finalizer
            .complete_sale(&mut cart, cash(f64::NAN), None)
            .await;

        assert!(matches!(result, Err(CartError::InvalidAmount(_))));
        assert_eq!(cart.len(), 1);
        assert_eq!(catalog.sale_count(), 0);
    }

    #[test]
    fn test_sold_quantities_aggregates_in_first_seen_order() {
        let items = vec![
            line_item("product:a", 1.0, 2),
            line_item("product:b", 2.0, 1),
            line_item("product:a", 1.0, 3),
        ];
        assert_eq!(
            sold_quantities(&items),
            vec![
                ("product:a".to_string(), 5),
                ("product:b".to_string(), 1)
            ]
        );
    }
}
