//! # Storefront Client Core
//!
//! Client-side state for an e-commerce storefront: product browsing with pagination and
//! infinite scroll, quick search, a shopping cart and login gating, over a remote REST API.
//!
//! ## Core Components
//!
//! - **[page_store]**: the paginated product list and its navigation
//! - **[suggestion_store]**: quick-lookup suggestions
//! - **[cart_store]**: cart lines and totals
//! - **[search]**: keyword commits, debounced lookups and the throttled viewport
//! - **[clients]**: type-safe wrappers around each store
//! - **[api]**: the [`StorefrontApi`](api::StorefrontApi) seam, its HTTP client and an in-memory mock
//! - **[auth]**: the in-memory login session
//! - **[config]**: layered configuration
//! - **[lifecycle]**: starts and stops everything as one [`Storefront`](lifecycle::Storefront)
//!
//! Every store is a [`SliceActor`](store_framework::SliceActor): state is owned by one task and
//! published on a `watch` channel for the renderer.

pub mod api;
pub mod auth;
pub mod cart_store;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod page_store;
pub mod search;
pub mod suggestion_store;
