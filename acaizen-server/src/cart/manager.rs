//! Per-terminal cart registry
//!
//! One in-progress cart per terminal id. Each cart sits behind an async
//! mutex: cart operations are short and synchronous, but checkout holds the
//! lock across its persistence calls so a terminal can never double-submit.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use super::Cart;

/// Registry of in-progress carts, keyed by terminal id
#[derive(Debug, Default)]
pub struct CartManager {
    carts: DashMap<String, Arc<Mutex<Cart>>>,
}

impl CartManager {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Get the cart for a terminal, creating an empty one on first use
    pub fn cart(&self, terminal: &str) -> Arc<Mutex<Cart>> {
        self.carts
            .entry(terminal.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Cart::new())))
            .clone()
    }

    /// Drop a terminal's cart entirely
    pub fn remove(&self, terminal: &str) {
        self.carts.remove(terminal);
    }

    /// Number of terminals with a registered cart
    pub fn terminal_count(&self) -> usize {
        self.carts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::cart::CartLineItem;

    fn item() -> CartLineItem {
        CartLineItem {
            product_id: "product:p1".to_string(),
            name: "Água Mineral".to_string(),
            price: 3.0,
            quantity: 1,
            addons: Vec::new(),
            note: None,
        }
    }

    #[tokio::test]
    async fn test_same_terminal_shares_cart() {
        let manager = CartManager::new();

        {
            let cart = manager.cart("pos-1");
            cart.lock().await.add_item(item()).unwrap();
        }

        let cart = manager.cart("pos-1");
        assert_eq!(cart.lock().await.len(), 1);
        assert_eq!(manager.terminal_count(), 1);
    }

    #[tokio::test]
    async fn test_terminals_are_isolated() {
        let manager = CartManager::new();

        manager.cart("pos-1").lock().await.add_item(item()).unwrap();

        assert!(manager.cart("pos-2").lock().await.is_empty());
        assert_eq!(manager.terminal_count(), 2);
    }

    #[tokio::test]
    async fn test_remove_discards_cart() {
        let manager = CartManager::new();
        manager.cart("pos-1").lock().await.add_item(item()).unwrap();

        manager.remove("pos-1");
        assert!(manager.cart("pos-1").lock().await.is_empty());
    }
}
