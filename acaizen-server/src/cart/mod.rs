//! Cart Aggregator
//!
//! Holds the ordered line items of one in-progress transaction and their
//! merge/update semantics. Append order is display order; no reordering.
//!
//! Two slots are the *same* iff product identity, the full add-on multiset,
//! and the note are all equal. The aggregator never holds two such slots at
//! once: adding merges by summing quantity. Identity is captured in a
//! content-addressed line key, the same scheme used for order item instance
//! ids elsewhere in the stack.

mod error;
mod manager;

pub use error::CartError;
pub use manager::CartManager;

use sha2::{Digest, Sha256};
use shared::cart::{CartAddon, CartLineItem};

use crate::money;

/// Generate a content-addressed line key for a cart slot
///
/// Hashes the identity-defining properties: product id, add-on multiset
/// (sorted, so selection order never affects identity), and note. Price is
/// excluded: a line item always carries the price captured at add time, so
/// equal identity implies equal price within one cart.
pub fn line_key(product_id: &str, addons: &[CartAddon], note: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(product_id.as_bytes());

    let mut sorted: Vec<&CartAddon> = addons.iter().collect();
    sorted.sort_by(|a, b| {
        a.addon_id
            .cmp(&b.addon_id)
            .then(a.quantity.cmp(&b.quantity))
    });
    for addon in sorted {
        hasher.update([0u8]);
        hasher.update(addon.addon_id.as_bytes());
        hasher.update(addon.quantity.to_be_bytes());
    }

    if let Some(note) = note {
        hasher.update([1u8]);
        hasher.update(note.as_bytes());
    }

    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}

fn item_key(item: &CartLineItem) -> String {
    line_key(&item.product_id, &item.addons, item.note.as_deref())
}

/// In-progress transaction: an ordered sequence of line items
///
/// Single-writer (one cashier session); all operations are synchronous and
/// in-memory. The total is derived, never stored.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line item, merging into an existing slot with the same identity
    ///
    /// Returns the index of the slot the item landed in. No stock bound is
    /// enforced here; stock is a sale-completion concern.
    pub fn add_item(&mut self, item: CartLineItem) -> Result<usize, CartError> {
        money::validate_line_item(&item)?;

        let key = item_key(&item);
        if let Some((index, existing)) = self
            .items
            .iter_mut()
            .enumerate()
            .find(|(_, i)| item_key(i) == key)
        {
            existing.quantity += item.quantity;
            Ok(index)
        } else {
            self.items.push(item);
            Ok(self.items.len() - 1)
        }
    }

    /// Replace the quantity (and optionally add-ons/note) of the slot at `index`
    ///
    /// Equal siblings are intentionally not re-merged after an update: a
    /// cashier editing one of two identical rows expects them to stay apart.
    /// The slot is untouched when validation fails.
    pub fn update_item(
        &mut self,
        index: usize,
        quantity: i32,
        addons: Option<Vec<CartAddon>>,
        note: Option<String>,
    ) -> Result<(), CartError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::OutOfRange { index, len })?;

        let mut updated = item.clone();
        updated.quantity = quantity;
        if let Some(addons) = addons {
            updated.addons = addons;
        }
        if let Some(note) = note {
            updated.note = Some(note);
        }
        money::validate_line_item(&updated)?;

        *item = updated;
        Ok(())
    }

    /// Remove the slot at `index`, shifting subsequent slots left
    pub fn remove_item(&mut self, index: usize) -> Result<CartLineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Reset to empty; idempotent
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Current total, recomputed from the line items on every call
    pub fn total(&self) -> f64 {
        money::to_f64(money::cart_total(&self.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, price: f64, quantity: i32) -> CartLineItem {
        CartLineItem {
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            price,
            quantity,
            addons: Vec::new(),
            note: None,
        }
    }

    fn item_with(
        product_id: &str,
        price: f64,
        quantity: i32,
        addons: Vec<CartAddon>,
        note: Option<&str>,
    ) -> CartLineItem {
        CartLineItem {
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            price,
            quantity,
            addons,
            note: note.map(str::to_string),
        }
    }

    fn addon(addon_id: &str, price: f64, quantity: i32) -> CartAddon {
        CartAddon {
            addon_id: addon_id.to_string(),
            name: addon_id.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_merge_invariant_sums_quantities() {
        let mut cart = Cart::new();
        cart.add_item(item("product:acai", 14.90, 2)).unwrap();
        cart.add_item(item("product:acai", 14.90, 1)).unwrap();
        cart.add_item(item("product:acai", 14.90, 3)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 6);
    }

    #[test]
    fn test_different_note_creates_new_slot() {
        let mut cart = Cart::new();
        cart.add_item(item_with("product:agua", 3.00, 1, vec![], None))
            .unwrap();
        cart.add_item(item_with("product:agua", 3.00, 1, vec![], Some("sem gás")))
            .unwrap();

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_addon_order_does_not_affect_identity() {
        let mut cart = Cart::new();
        cart.add_item(item_with(
            "product:acai",
            14.90,
            1,
            vec![addon("addon:granola", 2.00, 1), addon("addon:leite", 3.00, 2)],
            None,
        ))
        .unwrap();
        cart.add_item(item_with(
            "product:acai",
            14.90,
            1,
            vec![addon("addon:leite", 3.00, 2), addon("addon:granola", 2.00, 1)],
            None,
        ))
        .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_different_addon_quantity_creates_new_slot() {
        let mut cart = Cart::new();
        cart.add_item(item_with(
            "product:acai",
            14.90,
            1,
            vec![addon("addon:granola", 2.00, 1)],
            None,
        ))
        .unwrap();
        cart.add_item(item_with(
            "product:acai",
            14.90,
            1,
            vec![addon("addon:granola", 2.00, 2)],
            None,
        ))
        .unwrap();

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_append_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add_item(item("product:a", 1.00, 1)).unwrap();
        cart.add_item(item("product:b", 2.00, 1)).unwrap();
        cart.add_item(item("product:c", 3.00, 1)).unwrap();
        // Merging into an earlier slot must not reorder
        cart.add_item(item("product:a", 1.00, 1)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["product:a", "product:b", "product:c"]);
    }

    #[test]
    fn test_total_example_scenario() {
        // Açaí 300ml × 2 @ 14.90 + Água @ 3.00 = 32.80
        let mut cart = Cart::new();
        cart.add_item(item("product:acai", 14.90, 2)).unwrap();
        cart.add_item(item_with("product:agua", 3.00, 1, vec![], Some("sem gás")))
            .unwrap();

        assert_eq!(cart.total(), 32.80);
    }

    #[test]
    fn test_total_with_addons() {
        let mut cart = Cart::new();
        cart.add_item(item_with(
            "product:acai",
            14.90,
            1,
            vec![addon("addon:granola", 2.00, 1), addon("addon:leite", 3.00, 2)],
            None,
        ))
        .unwrap();

        assert_eq!(cart.total(), 22.90);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        let result = cart.add_item(item("product:acai", 14.90, 0));
        assert!(matches!(result, Err(CartError::InvalidInput(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("product:acai", 14.90, 2)).unwrap();
        cart.update_item(0, 5, None, None).unwrap();

        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_update_out_of_range() {
        let mut cart = Cart::new();
        cart.add_item(item("product:acai", 14.90, 1)).unwrap();

        let result = cart.update_item(3, 2, None, None);
        assert!(matches!(
            result,
            Err(CartError::OutOfRange { index: 3, len: 1 })
        ));
    }

    #[test]
    fn test_update_does_not_remerge_equal_siblings() {
        let mut cart = Cart::new();
        cart.add_item(item_with("product:agua", 3.00, 1, vec![], None))
            .unwrap();
        cart.add_item(item_with("product:agua", 3.00, 1, vec![], Some("sem gás")))
            .unwrap();

        // Clearing the distinction via update makes the rows equal, but they
        // must remain distinct entries
        cart.update_item(1, 1, None, Some(String::new())).unwrap();
        cart.update_item(0, 1, None, Some(String::new())).unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_update_invalid_quantity_leaves_slot_untouched() {
        let mut cart = Cart::new();
        cart.add_item(item("product:acai", 14.90, 2)).unwrap();

        let result = cart.update_item(0, 0, None, Some("extra".to_string()));
        assert!(matches!(result, Err(CartError::InvalidInput(_))));
        assert_eq!(cart.items()[0].quantity, 2);
        assert!(cart.items()[0].note.is_none());
    }

    #[test]
    fn test_remove_shifts_left() {
        let mut cart = Cart::new();
        cart.add_item(item("product:a", 1.00, 1)).unwrap();
        cart.add_item(item("product:b", 2.00, 1)).unwrap();
        cart.add_item(item("product:c", 3.00, 1)).unwrap();

        let removed = cart.remove_item(1).unwrap();
        assert_eq!(removed.product_id, "product:b");

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["product:a", "product:c"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.remove_item(0),
            Err(CartError::OutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(item("product:acai", 14.90, 1)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }
}
