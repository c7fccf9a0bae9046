use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    models::{CartEntry, Catalog, ProductError},
    services::cart_view::{self, CartSummary, CheckoutNotice},
    store::CartStore,
};

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Product not found in catalog: {name}")]
    ProductNotFound { name: String },

    #[error("Product already added to cart: {name}")]
    AlreadyAdded { name: String },

    #[error("Product is not in the cart: {name}")]
    NotInCart { name: String },

    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Catalog,
    Cart,
}

/// A user gesture, as recorded in replay scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Gesture {
    AddToCart { name: String },
    Increment { name: String },
    Decrement { name: String },
    Remove { name: String },
    Checkout,
    ShowCart,
    ShowPlants,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added { name: String, quantity: u32 },
    Updated { name: String, quantity: u32 },
    Removed { name: String },
    Checkout(CheckoutNotice),
    Navigated(View),
}

/// One shopping session: the catalog, the cart and the screen state around
/// them. Dropping it ends the session; nothing outlives it.
pub struct Storefront {
    session_id: Uuid,
    catalog: Catalog,
    store: CartStore,
    view: View,
    added: HashSet<String>,
}

impl Storefront {
    pub fn new(catalog: Catalog) -> Self {
        let session_id = Uuid::new_v4();
        info!(
            "Session {} started with {} products",
            session_id,
            catalog.len()
        );
        Self {
            session_id,
            catalog,
            store: CartStore::new(),
            view: View::Catalog,
            added: HashSet::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn show_plants(&mut self) {
        self.navigate(View::Catalog);
    }

    pub fn show_cart(&mut self) {
        self.navigate(View::Cart);
    }

    pub fn continue_shopping(&mut self) {
        self.navigate(View::Catalog);
    }

    fn navigate(&mut self, view: View) {
        debug!("Session {}: view {:?} -> {:?}", self.session_id, self.view, view);
        self.view = view;
    }

    /// Whether the product's "Add to Cart" control has been used.
    ///
    /// The flag latches: removing the product from the cart later does not
    /// clear it.
    pub fn is_added(&self, name: &str) -> bool {
        self.added.contains(name)
    }

    pub fn add_to_cart(&mut self, name: &str) -> Result<u32, StorefrontError> {
        if self.is_added(name) {
            return Err(StorefrontError::AlreadyAdded {
                name: name.to_string(),
            });
        }

        let product = self
            .catalog
            .find(name)
            .ok_or_else(|| StorefrontError::ProductNotFound {
                name: name.to_string(),
            })?;

        let quantity = self.store.add_item(product)?;
        self.added.insert(product.name.clone());
        Ok(quantity)
    }

    fn entry(&self, name: &str) -> Result<CartEntry, StorefrontError> {
        self.store
            .get(name)
            .cloned()
            .ok_or_else(|| StorefrontError::NotInCart {
                name: name.to_string(),
            })
    }

    /// Quantity after the gesture; `None` once the entry is gone.
    pub fn increment(&mut self, name: &str) -> Result<Option<u32>, StorefrontError> {
        let entry = self.entry(name)?;
        cart_view::increment(&mut self.store, &entry);
        Ok(self.quantity_of(name))
    }

    pub fn decrement(&mut self, name: &str) -> Result<Option<u32>, StorefrontError> {
        let entry = self.entry(name)?;
        cart_view::decrement(&mut self.store, &entry);
        Ok(self.quantity_of(name))
    }

    pub fn remove(&mut self, name: &str) -> Result<(), StorefrontError> {
        let entry = self.entry(name)?;
        cart_view::remove(&mut self.store, &entry);
        Ok(())
    }

    pub fn checkout(&self) -> CheckoutNotice {
        cart_view::checkout()
    }

    fn quantity_of(&self, name: &str) -> Option<u32> {
        self.store.get(name).map(|e| e.quantity)
    }

    /// Count shown on the cart control; hidden while the cart is empty.
    pub fn badge(&self) -> Option<u64> {
        match cart_view::total_quantity(self.store.entries()) {
            0 => None,
            total => Some(total),
        }
    }

    pub fn summary(&self) -> CartSummary {
        cart_view::summarize(self.store.entries())
    }

    pub fn apply(&mut self, gesture: Gesture) -> Result<Outcome, StorefrontError> {
        let outcome = match gesture {
            Gesture::AddToCart { name } => {
                let quantity = self.add_to_cart(&name)?;
                Outcome::Added { name, quantity }
            }
            Gesture::Increment { name } => {
                let quantity = self.increment(&name)?;
                Self::changed(name, quantity)
            }
            Gesture::Decrement { name } => {
                let quantity = self.decrement(&name)?;
                Self::changed(name, quantity)
            }
            Gesture::Remove { name } => {
                self.remove(&name)?;
                Outcome::Removed { name }
            }
            Gesture::Checkout => Outcome::Checkout(self.checkout()),
            Gesture::ShowCart => {
                self.show_cart();
                Outcome::Navigated(self.view)
            }
            Gesture::ShowPlants => {
                self.show_plants();
                Outcome::Navigated(self.view)
            }
        };
        Ok(outcome)
    }

    fn changed(name: String, quantity: Option<u32>) -> Outcome {
        match quantity {
            Some(quantity) => Outcome::Updated { name, quantity },
            None => Outcome::Removed { name },
        }
    }

    /// Apply gestures in order. A failed gesture is logged and skipped.
    pub fn replay(
        &mut self,
        gestures: Vec<Gesture>,
    ) -> Vec<Result<Outcome, StorefrontError>> {
        gestures
            .into_iter()
            .map(|gesture| {
                let result = self.apply(gesture);
                if let Err(e) = &result {
                    warn!("Session {}: gesture failed: {}", self.session_id, e);
                }
                result
            })
            .collect()
    }
}
