use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::{
    models::{Catalog, ProductError},
    services::cart_view::cost_of,
};

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid product '{name}': {source}")]
    InvalidProduct {
        name: String,
        #[source]
        source: ProductError,
    },

    #[error("Product '{name}' has a negative cost")]
    NegativeCost { name: String },

    #[error("Duplicate product name in catalog: {name}")]
    DuplicateProduct { name: String },

    #[error("Catalog has no categories")]
    Empty,
}

/// Where the storefront gets its products from.
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError>;

    fn describe(&self) -> String;
}

/// The catalog compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        parse_catalog(EMBEDDED_CATALOG)
    }

    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }
}

/// A catalog read from a JSON file on every `load`.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        info!("Loading catalog from {}", self.path.display());
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_catalog(&raw)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

/// Parse and validate a JSON catalog.
pub fn parse_catalog(raw: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(raw)?;
    validate_catalog(&catalog)?;
    debug!(
        "Catalog parsed: {} categories, {} products",
        catalog.categories().len(),
        catalog.len()
    );
    Ok(catalog)
}

/// Product names must be unique across all categories. A cost that does not
/// parse is let through; it shows up as NaN in the cart.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    if catalog.categories().is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for category in catalog.categories() {
        if category.plants.is_empty() {
            warn!("Category '{}' has no products", category.category);
        }

        for product in &category.plants {
            product
                .validate()
                .map_err(|e| CatalogError::InvalidProduct {
                    name: product.name.clone(),
                    source: ProductError::from(e),
                })?;

            if !seen.insert(product.name.as_str()) {
                return Err(CatalogError::DuplicateProduct {
                    name: product.name.clone(),
                });
            }

            let amount = cost_of(&product.cost);
            if amount.is_nan() {
                warn!(
                    "Product '{}' has an unparseable cost '{}'",
                    product.name, product.cost
                );
            } else if amount < 0.0 {
                return Err(CatalogError::NegativeCost {
                    name: product.name.clone(),
                });
            }
        }
    }

    Ok(())
}
