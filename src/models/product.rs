use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Price of a product as it arrives from the catalog: either a currency
/// string such as `"$15"` or a plain number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    Amount(f64),
    Text(String),
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Amount(amount) => write!(f, "{}", amount),
            Cost::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<&str> for Cost {
    fn from(text: &str) -> Self {
        Cost::Text(text.to_string())
    }
}

impl From<String> for Cost {
    fn from(text: String) -> Self {
        Cost::Text(text)
    }
}

impl From<f64> for Cost {
    fn from(amount: f64) -> Self {
        Cost::Amount(amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description must be less than 1000 characters"))]
    pub description: String,

    pub cost: Cost,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Product name is empty")]
    MissingName,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        description: impl Into<String>,
        cost: impl Into<Cost>,
    ) -> Result<Self, ProductError> {
        let product = Self {
            name: name.into(),
            image: image.into(),
            description: description.into(),
            cost: cost.into(),
        };
        product.validate()?;
        Ok(product)
    }
}

/// One heading of the catalog with its products in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category: String,
    pub plants: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Wraps categories without checking them; loading through a
    /// `CatalogSource` is what enforces name uniqueness.
    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.category == name)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.categories.iter().flat_map(|c| c.plants.iter())
    }

    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.plants.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
