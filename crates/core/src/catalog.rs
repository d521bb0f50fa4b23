//! The fixed product catalog.
//!
//! Products are defined once at startup and never mutated. Request handlers
//! resolve incoming product IDs through [`Catalog::lookup`], so the cart only
//! ever sees products that exist.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Errors raised while building or querying a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    #[error("product {0} has a zero price")]
    ZeroPrice(ProductId),
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price: Price::new(price),
        }
    }
}

/// An ordered, validated list of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if two products share an ID, or a product has a
    /// zero price or a blank name.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
            if product.price.is_zero() {
                return Err(CatalogError::ZeroPrice(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
        }
        Ok(Self { products })
    }

    /// The built-in firecracker catalog.
    #[must_use]
    pub fn firecrackers() -> Self {
        Self {
            products: vec![
                Product::new(1, "Sparkler", 5),
                Product::new(2, "Fountain", 10),
                Product::new(3, "Rocket", 15),
                Product::new(4, "Bomb", 20),
                Product::new(5, "Catherine Wheel", 25),
            ],
        }
    }

    /// Find a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Find a product by ID, failing if it is not in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownProduct` if no product has this ID.
    pub fn lookup(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.get(id).ok_or(CatalogError::UnknownProduct(id))
    }

    /// Iterate products in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::firecrackers()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_firecrackers_has_five_products_in_order() {
        let catalog = Catalog::firecrackers();
        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Sparkler", "Fountain", "Rocket", "Bomb", "Catherine Wheel"]
        );
    }

    #[test]
    fn test_firecrackers_passes_validation() {
        let builtin = Catalog::firecrackers();
        let rebuilt = Catalog::new(builtin.iter().cloned().collect()).unwrap();
        assert_eq!(rebuilt, builtin);
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let catalog = Catalog::firecrackers();
        let rocket = catalog.lookup(ProductId::new(3)).unwrap();
        assert_eq!(rocket.name, "Rocket");
        assert_eq!(rocket.price, Price::new(15));

        assert_eq!(
            catalog.lookup(ProductId::new(99)),
            Err(CatalogError::UnknownProduct(ProductId::new(99)))
        );
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Product::new(1, "Sparkler", 5),
            Product::new(1, "Other Sparkler", 6),
        ]);
        assert_eq!(
            result,
            Err(CatalogError::DuplicateProduct(ProductId::new(1)))
        );
    }

    #[test]
    fn test_new_rejects_zero_price_and_blank_name() {
        assert_eq!(
            Catalog::new(vec![Product::new(2, "Dud", 0)]),
            Err(CatalogError::ZeroPrice(ProductId::new(2)))
        );
        assert_eq!(
            Catalog::new(vec![Product::new(3, "  ", 4)]),
            Err(CatalogError::EmptyName(ProductId::new(3)))
        );
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_value(Catalog::firecrackers()).unwrap();
        assert_eq!(json[0]["name"], "Sparkler");
        assert_eq!(json[4]["price"], 25);
    }
}
