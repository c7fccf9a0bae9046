use serde::{Deserialize, Serialize};

use crate::models::product::{Cost, Product};

/// One line of the cart. The product name is the line's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub name: String,
    pub image: String,
    pub cost: Cost,
    pub quantity: u32,
}

impl CartEntry {
    /// Copies name, image and cost from the product; a new line starts at 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            image: product.image.clone(),
            cost: product.cost.clone(),
            quantity: 1,
        }
    }
}

/// Transitions accepted by `CartStore::dispatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    AddItem(Product),
    RemoveItem { name: String },
    UpdateQuantity { name: String, quantity: u32 },
}
