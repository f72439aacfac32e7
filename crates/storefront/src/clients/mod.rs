//! # Store Clients
//!
//! Type-safe wrappers around the generic [`SliceClient`](store_framework::SliceClient) of each
//! store. They turn user operations into intents and framework failures into store errors, and
//! inherit `snapshot`, `subscribe` and `latest` from [`StoreClient`](store_framework::StoreClient).

pub mod cart_client;
pub mod page_client;
pub mod suggestion_client;

pub use cart_client::CartClient;
pub use page_client::PageClient;
pub use suggestion_client::SuggestionClient;
