//! # Page Store
//!
//! The paginated product list behind the browse view: the items on screen, which page they
//! are, how many pages exist and whether a load is running.
//!
//! ## Structure
//!
//! - [`slice`] - [`AsyncSlice`](store_framework::AsyncSlice) implementation for [`PageState`]
//! - [`actions`] - [`PageIntent`], [`PageTarget`] and [`MergeMode`]
//! - [`error`] - [`PageError`] for client-side failures
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## State Machine
//!
//! ```text
//! Idle --dispatch--> Loading --ok--> Succeeded --dispatch--> Loading ...
//!                            \--err-> Failed    --dispatch--> Loading ...
//! ```
//!
//! There is no terminal state. Loads are not serialized: when two navigations overlap, the one
//! whose response settles last decides `items` and `current_page`. The renderer should not
//! offer navigation while [`PageSnapshot::is_loading`] is true.
//!
//! ## Usage
//!
//! ```rust
//! use storefront::api::mock::MockApi;
//! use storefront::api::SharedApi;
//! use storefront::page_store;
//! use std::num::NonZeroU32;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api: SharedApi = Arc::new(MockApi::with_products(20));
//!     let (actor, client) = page_store::new(NonZeroU32::new(8).ok_or("zero")?, 32);
//!     tokio::spawn(actor.run(api));
//!
//!     let first = client.load_first_page("").await?;
//!     assert_eq!(first.total_pages, 3);
//!     let scrolled = client.append_next_page().await?;
//!     assert_eq!(scrolled.items.len(), 16);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod error;
pub mod slice;

pub use actions::*;
pub use error::*;
pub use slice::*;

use crate::clients::PageClient;
use std::num::NonZeroU32;
use store_framework::SliceActor;

/// Creates a new page store actor and its client.
pub fn new(page_size: NonZeroU32, buffer_size: usize) -> (SliceActor<PageState>, PageClient) {
    let (actor, generic_client) = SliceActor::new(PageState::new(page_size), buffer_size);
    (actor, PageClient::new(generic_client))
}
