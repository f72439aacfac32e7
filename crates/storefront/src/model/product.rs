//! Products as the storefront shows them.
//!
//! A [`ProductSummary`] is immutable once fetched: stores replace it wholesale on re-fetch.
//! Instances come either from the API layer, which validates them, or from
//! [`ProductSummary::new`].

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    /// Non-negative and finite.
    pub price: f64,
    /// Image URL.
    pub image: String,
    pub category: String,
    pub stock: u32,
    pub description: Option<String>,
}

impl ProductSummary {
    /// Creates a product without a description.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the catalog
    /// * `name` - Display name
    /// * `price` - Unit price
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            category: String::new(),
            stock: 0,
            description: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// One page of the product list as answered by the catalog.
///
/// `1 <= current_page <= total_pages` holds for every value built by the API layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub current_page: u32,
    pub total_pages: u32,
}
