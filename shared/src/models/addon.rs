//! Add-on Model

use super::Product;
use serde::{Deserialize, Serialize};

/// Priced extra attachable to a cart line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Addon {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// When set, the add-on may only be attached to products of this category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Addon {
    /// Whether this add-on may be attached to the given product
    ///
    /// Unrestricted add-ons attach to anything; restricted ones require a
    /// matching product category.
    pub fn eligible_for(&self, product: &Product) -> bool {
        match &self.category {
            Some(category) => *category == product.category,
            None => true,
        }
    }
}

/// Create add-on payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonCreate {
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
}

/// Update add-on payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(category: &str) -> Product {
        Product {
            id: "product:p1".to_string(),
            name: "Açaí Tradicional 300ml".to_string(),
            price: 14.90,
            category: category.to_string(),
            description: String::new(),
            image: None,
            stock: 100,
        }
    }

    #[test]
    fn test_unrestricted_addon_is_always_eligible() {
        let addon = Addon {
            id: "addon:a1".to_string(),
            name: "Granola".to_string(),
            price: 2.0,
            category: None,
        };
        assert!(addon.eligible_for(&product("category:acai")));
        assert!(addon.eligible_for(&product("category:bebidas")));
    }

    #[test]
    fn test_restricted_addon_requires_matching_category() {
        let addon = Addon {
            id: "addon:a2".to_string(),
            name: "Leite Condensado".to_string(),
            price: 3.0,
            category: Some("category:acai".to_string()),
        };
        assert!(addon.eligible_for(&product("category:acai")));
        assert!(!addon.eligible_for(&product("category:bebidas")));
    }
}
