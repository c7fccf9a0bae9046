use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{CartAction, CartEntry, Product, ProductError};

/// In-memory cart for one session.
///
/// Entries are kept in insertion order and there is at most one entry per
/// product name. This is the only type that mutates cart entries; view code
/// reads `entries()` and goes through the three transitions below.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartStore {
    items: Vec<CartEntry>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// An existing entry with the same name gets its quantity bumped and
    /// nothing else; otherwise a new entry with quantity 1 is appended.
    /// Returns the entry's quantity after the add. The only requirement on
    /// `product` is a non-empty name; display limits belong to catalog loading.
    pub fn add_item(&mut self, product: &Product) -> Result<u32, ProductError> {
        if product.name.is_empty() {
            return Err(ProductError::MissingName);
        }

        if let Some(existing) = self.items.iter_mut().find(|e| e.name == product.name) {
            existing.quantity = existing.quantity.saturating_add(1);
            debug!(
                "Incremented '{}' in cart to quantity {}",
                existing.name, existing.quantity
            );
            return Ok(existing.quantity);
        }

        self.items.push(CartEntry::from_product(product));
        info!("Added '{}' to cart", product.name);
        Ok(1)
    }

    /// Remove the entry named `name`. Missing names are a no-op.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.name != name);
        let removed = self.items.len() != before;

        if removed {
            info!("Removed '{}' from cart", name);
        } else {
            debug!("Remove ignored, '{}' is not in the cart", name);
        }
        removed
    }

    /// Overwrite the quantity of the entry named `name`.
    ///
    /// A quantity of 0 removes the entry so no line is ever kept at zero.
    /// Missing names are a no-op. Returns whether an entry matched.
    pub fn update_quantity(&mut self, name: &str, quantity: u32) -> bool {
        if quantity == 0 {
            warn!("Quantity 0 requested for '{}', removing entry", name);
            return self.remove_item(name);
        }

        match self.items.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                debug!(
                    "Quantity of '{}' set from {} to {}",
                    name, entry.quantity, quantity
                );
                entry.quantity = quantity;
                true
            }
            None => {
                debug!("Quantity update ignored, '{}' is not in the cart", name);
                false
            }
        }
    }

    /// Apply one action. Actions take effect in the order they are dispatched.
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), ProductError> {
        match action {
            CartAction::AddItem(product) => {
                self.add_item(&product)?;
            }
            CartAction::RemoveItem { name } => {
                self.remove_item(&name);
            }
            CartAction::UpdateQuantity { name, quantity } => {
                self.update_quantity(&name, quantity);
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&CartEntry> {
        self.items.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cost;

    fn plant(name: &str, cost: &str) -> Product {
        Product::new(name, format!("{}.jpg", name), "", cost).unwrap()
    }

    #[test]
    fn test_add_new_item_starts_at_one() {
        let mut store = CartStore::new();
        let quantity = store.add_item(&plant("Aloe Vera", "$14")).unwrap();

        assert_eq!(quantity, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].image, "Aloe Vera.jpg");
    }

    #[test]
    fn test_add_existing_item_only_touches_quantity() {
        let mut store = CartStore::new();
        store.add_item(&plant("Aloe Vera", "$14")).unwrap();

        // Same name with a different price: the copied cost stays.
        let quantity = store.add_item(&plant("Aloe Vera", "$99")).unwrap();

        assert_eq!(quantity, 2);
        let entry = store.get("Aloe Vera").unwrap();
        assert_eq!(entry.cost, Cost::from("$14"));
    }

    fn unchecked(name: &str, description: &str) -> Product {
        Product {
            name: name.to_string(),
            image: String::new(),
            description: description.to_string(),
            cost: "$1".into(),
        }
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut store = CartStore::new();

        assert!(matches!(
            store.add_item(&unchecked("", "")),
            Err(ProductError::MissingName)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_ignores_display_limits() {
        let mut store = CartStore::new();
        let long_description = "x".repeat(1001);
        let long_name = "n".repeat(256);

        assert_eq!(store.add_item(&unchecked("Fern", &long_description)).unwrap(), 1);
        assert_eq!(store.add_item(&unchecked(&long_name, "")).unwrap(), 1);
        assert_eq!(store.add_item(&unchecked("   ", "")).unwrap(), 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut store = CartStore::new();
        store.add_item(&plant("Mint", "$12")).unwrap();

        assert!(store.update_quantity("Mint", 0));
        assert!(!store.contains("Mint"));
    }

    #[test]
    fn test_missing_names_are_no_ops() {
        let mut store = CartStore::new();
        store.add_item(&plant("Mint", "$12")).unwrap();
        let before = store.clone();

        assert!(!store.remove_item("Cactus"));
        assert!(!store.update_quantity("Cactus", 4));
        assert_eq!(store, before);
    }

    #[test]
    fn test_dispatch_applies_in_order() {
        let mut store = CartStore::new();
        let actions = vec![
            CartAction::AddItem(plant("Mint", "$12")),
            CartAction::AddItem(plant("Basil", "$9")),
            CartAction::UpdateQuantity {
                name: "Mint".to_string(),
                quantity: 5,
            },
            CartAction::RemoveItem {
                name: "Basil".to_string(),
            },
            CartAction::AddItem(plant("Basil", "$9")),
        ];

        for action in actions {
            store.dispatch(action).unwrap();
        }

        let names: Vec<&str> = store.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Mint", "Basil"]);
        assert_eq!(store.get("Mint").unwrap().quantity, 5);
        assert_eq!(store.get("Basil").unwrap().quantity, 1);
    }
}
