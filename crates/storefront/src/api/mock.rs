//! # In-memory API
//!
//! [`MockApi`] answers [`StorefrontApi`] calls from a catalog and a cart kept in memory. It
//! records every list and search call and can be scripted to fail or to delay specific pages,
//! which is what store tests need to observe ordering and failure handling.
//!
//! ```rust
//! use storefront::api::mock::MockApi;
//! use storefront::api::{ListQuery, StorefrontApi};
//! use std::num::NonZeroU32;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = MockApi::with_products(20);
//!     let limit = NonZeroU32::new(8).ok_or("zero page size")?;
//!
//!     let page = api.list_products(&ListQuery::new(3, limit, "")).await?;
//!     assert_eq!(page.products.len(), 4);
//!     assert_eq!(page.total_pages, 3);
//!     Ok(())
//! }
//! ```

use crate::api::{ApiError, CartMutation, ListQuery, StorefrontApi};
use crate::model::{
    CartContents, CartItem, Credentials, LoginGrant, ProductSummary, ProductPage, User,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// How many suggestions a quick search answers at most.
pub const SUGGESTION_LIMIT: usize = 5;

const CATEGORIES: [&str; 3] = ["electronics", "home", "kitchen"];

/// Product number `n` of the generated catalog: id `"{n}"`, name `"Product {n}"`.
pub fn sample_product(n: usize) -> ProductSummary {
    ProductSummary::new(n.to_string(), format!("Product {n}"), (n as f64) * 10.0)
        .with_category(CATEGORIES[n % CATEGORIES.len()])
        .with_stock(10 + n as u32)
        .with_image(format!("https://img.example.com/{n}.png"))
}

#[derive(Default)]
struct MockState {
    catalog: Vec<ProductSummary>,
    list_failures: VecDeque<ApiError>,
    search_failures: VecDeque<ApiError>,
    cart_failures: VecDeque<ApiError>,
    page_delays: HashMap<u32, Duration>,
    search_delay: Option<Duration>,
    list_calls: Vec<ListQuery>,
    search_calls: Vec<String>,
    cart: Vec<CartItem>,
}

#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub fn new(catalog: Vec<ProductSummary>) -> Self {
        Self {
            state: Mutex::new(MockState {
                catalog,
                ..MockState::default()
            }),
        }
    }

    /// A catalog of `count` generated products, numbered from 1.
    pub fn with_products(count: usize) -> Self {
        Self::new((1..=count).map(sample_product).collect())
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replaces the catalog; later calls see the new products.
    pub fn set_catalog(&self, catalog: Vec<ProductSummary>) {
        self.state().catalog = catalog;
    }

    /// The next list call fails with `error`. Queued failures are used in order.
    pub fn fail_next_list(&self, error: ApiError) {
        self.state().list_failures.push_back(error);
    }

    pub fn fail_next_search(&self, error: ApiError) {
        self.state().search_failures.push_back(error);
    }

    /// The next cart call (fetch, mutation or clear) fails with `error`.
    pub fn fail_next_cart(&self, error: ApiError) {
        self.state().cart_failures.push_back(error);
    }

    /// Every list call for `page` waits `delay` before answering.
    pub fn delay_page(&self, page: u32, delay: Duration) {
        self.state().page_delays.insert(page, delay);
    }

    pub fn delay_search(&self, delay: Duration) {
        self.state().search_delay = Some(delay);
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.state().list_calls.clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.state().search_calls.clone()
    }

    pub fn cart_items(&self) -> Vec<CartItem> {
        self.state().cart.clone()
    }

    fn matching(catalog: &[ProductSummary], keyword: &str) -> Vec<ProductSummary> {
        let needle = keyword.to_lowercase();
        catalog
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn product(state: &MockState, id: &str) -> Result<ProductSummary, ApiError> {
        state
            .catalog
            .iter()
            .find(|p| p.id.0 == id)
            .cloned()
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: format!("product {id} not found"),
            })
    }
}

#[async_trait]
impl StorefrontApi for MockApi {
    async fn list_products(&self, query: &ListQuery) -> Result<ProductPage, ApiError> {
        let (delay, outcome) = {
            let mut state = self.state();
            state.list_calls.push(query.clone());
            let delay = state.page_delays.get(&query.page).copied();
            let outcome = match state.list_failures.pop_front() {
                Some(error) => Err(error),
                None => {
                    let matches = Self::matching(&state.catalog, &query.keyword);
                    let limit = query.limit.get() as usize;
                    let total_pages = matches.len().div_ceil(limit).max(1) as u32;
                    if query.page == 0 || query.page > total_pages {
                        Err(ApiError::Server {
                            status: 400,
                            message: format!("page {} out of range 1..={total_pages}", query.page),
                        })
                    } else {
                        let start = (query.page as usize - 1) * limit;
                        Ok(ProductPage {
                            products: matches.into_iter().skip(start).take(limit).collect(),
                            current_page: query.page,
                            total_pages,
                        })
                    }
                }
            };
            (delay, outcome)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        debug!(page = query.page, ok = outcome.is_ok(), "Mock list answered");
        outcome
    }

    async fn quick_search(&self, keyword: &str) -> Result<Vec<ProductSummary>, ApiError> {
        let (delay, outcome) = {
            let mut state = self.state();
            state.search_calls.push(keyword.to_string());
            let outcome = match state.search_failures.pop_front() {
                Some(error) => Err(error),
                None => {
                    let mut matches = Self::matching(&state.catalog, keyword);
                    matches.truncate(SUGGESTION_LIMIT);
                    Ok(matches)
                }
            };
            (state.search_delay, outcome)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        outcome
    }

    async fn fetch_cart(&self) -> Result<CartContents, ApiError> {
        let mut state = self.state();
        if let Some(error) = state.cart_failures.pop_front() {
            return Err(error);
        }
        Ok(CartContents {
            total_price: state.cart.iter().map(CartItem::subtotal).sum(),
            total_quantity: state.cart.iter().map(|item| item.quantity).sum(),
            items: state.cart.clone(),
        })
    }

    async fn mutate_cart(&self, mutation: &CartMutation) -> Result<CartItem, ApiError> {
        let mut state = self.state();
        if let Some(error) = state.cart_failures.pop_front() {
            return Err(error);
        }
        let product = Self::product(&state, &mutation.id().0)?;
        let position = state.cart.iter().position(|item| item.id() == mutation.id());

        let line = match (mutation, position) {
            (CartMutation::Add(_), Some(i)) => {
                state.cart[i].quantity += 1;
                state.cart[i].clone()
            }
            (CartMutation::Add(_), None) => {
                let line = CartItem::new(product, 1);
                state.cart.push(line.clone());
                line
            }
            (CartMutation::Minus(_), Some(i)) => {
                state.cart[i].quantity = state.cart[i].quantity.saturating_sub(1);
                state.cart[i].clone()
            }
            (CartMutation::Remove(_), Some(i)) => state.cart.remove(i),
            (CartMutation::SetQuantity { quantity, .. }, Some(i)) => {
                state.cart[i].quantity = *quantity;
                state.cart[i].clone()
            }
            (CartMutation::SetQuantity { quantity, .. }, None) => {
                let line = CartItem::new(product, *quantity);
                state.cart.push(line.clone());
                line
            }
            (CartMutation::Minus(id) | CartMutation::Remove(id), None) => {
                return Err(ApiError::Server {
                    status: 404,
                    message: format!("product {id} is not in the cart"),
                })
            }
        };
        Ok(line)
    }

    async fn clear_cart(&self) -> Result<(), ApiError> {
        let mut state = self.state();
        if let Some(error) = state.cart_failures.pop_front() {
            return Err(error);
        }
        state.cart.clear();
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(ApiError::Server {
                status: 401,
                message: "invalid credentials".to_string(),
            });
        }
        Ok(LoginGrant {
            user: User::new(credentials.username.clone()),
            token: format!("token-{}", credentials.username),
        })
    }
}
