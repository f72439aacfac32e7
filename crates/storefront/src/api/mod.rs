//! # Remote API
//!
//! The storefront talks to one REST service for products, cart and login. [`StorefrontApi`] is
//! the seam between the stores and that service:
//!
//! - [`HttpStorefrontApi`] - the real client, built on `reqwest`
//! - [`mock::MockApi`] - an in-memory catalog and cart for tests and offline demos
//!
//! Stores hold the API as a [`SharedApi`] in their actor context, so every in-flight fetch gets
//! its own cheap handle.
//!
//! | Operation | Request | Response |
//! |---|---|---|
//! | [`list_products`](StorefrontApi::list_products) | `GET products?page&limit[&keyword]` | `{products, currentPage, totalPages}` |
//! | [`quick_search`](StorefrontApi::quick_search) | `GET products/search?keyword` | `{products}` |
//! | [`fetch_cart`](StorefrontApi::fetch_cart) | `GET cart` | `{items, totalPrice, totalQuantity}` |
//! | [`mutate_cart`](StorefrontApi::mutate_cart) | `POST cart/{add,minus,remove,setQuantity}` | cart item |
//! | [`clear_cart`](StorefrontApi::clear_cart) | `POST cart/clear` | empty |
//! | [`login`](StorefrontApi::login) | `POST api/login` | `{user, token}` |

pub mod error;
pub mod http;
pub mod mock;
pub mod wire;

pub use error::ApiError;
pub use http::HttpStorefrontApi;

use crate::model::{
    CartContents, CartItem, Credentials, LoginGrant, ProductId, ProductPage, ProductSummary,
};
use async_trait::async_trait;
use std::num::NonZeroU32;
use std::sync::Arc;

pub type SharedApi = Arc<dyn StorefrontApi>;

/// Parameters of one product-list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-indexed.
    pub page: u32,
    pub limit: NonZeroU32,
    /// Empty means no filter; the parameter is then left out of the request.
    pub keyword: String,
}

impl ListQuery {
    pub fn new(page: u32, limit: NonZeroU32, keyword: impl Into<String>) -> Self {
        Self {
            page,
            limit,
            keyword: keyword.into(),
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        Some(self.keyword.as_str()).filter(|k| !k.is_empty())
    }
}

/// A change to one cart line. Every mutation answers with the affected line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMutation {
    Add(ProductId),
    Minus(ProductId),
    Remove(ProductId),
    SetQuantity { id: ProductId, quantity: u32 },
}

impl CartMutation {
    pub fn id(&self) -> &ProductId {
        match self {
            CartMutation::Add(id)
            | CartMutation::Minus(id)
            | CartMutation::Remove(id)
            | CartMutation::SetQuantity { id, .. } => id,
        }
    }

    /// Endpoint path, relative to the API base.
    pub fn path(&self) -> &'static str {
        match self {
            CartMutation::Add(_) => "cart/add",
            CartMutation::Minus(_) => "cart/minus",
            CartMutation::Remove(_) => "cart/remove",
            CartMutation::SetQuantity { .. } => "cart/setQuantity",
        }
    }
}

/// The remote product, cart and auth service.
#[async_trait]
pub trait StorefrontApi: Send + Sync + 'static {
    async fn list_products(&self, query: &ListQuery) -> Result<ProductPage, ApiError>;

    async fn quick_search(&self, keyword: &str) -> Result<Vec<ProductSummary>, ApiError>;

    async fn fetch_cart(&self) -> Result<CartContents, ApiError>;

    async fn mutate_cart(&self, mutation: &CartMutation) -> Result<CartItem, ApiError>;

    async fn clear_cart(&self) -> Result<(), ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError>;
}
