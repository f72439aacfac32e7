//! # System Lifecycle
//!
//! Wiring and shutdown of the store actors.
//!
//! Stores are created first, without dependencies, and receive the shared API client when
//! they are started with `run(context)`:
//!
//! ```rust,ignore
//! impl AsyncSlice for PageState {
//!     type Context = SharedApi; // Arc<dyn StorefrontApi>
//! }
//!
//! let (page_actor, pages) = page_store::new(page_size, 32);
//! tokio::spawn(page_actor.run(Arc::clone(&api)));
//! ```
//!
//! Shutdown drops every client. A store notices the closed channel, lets its in-flight fetches
//! settle and then ends its task; [`Storefront::shutdown`] awaits all of them.
//!
//! Logging is set up separately with
//! [`setup_tracing`](store_framework::tracing::setup_tracing).

pub mod storefront;

pub use storefront::*;
