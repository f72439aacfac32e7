//! # AsyncSlice Trait
//!
//! The `AsyncSlice` trait defines the contract that every piece of client state (the product
//! page list, the cart, the search suggestions, …) must implement to be managed by the generic
//! [`SliceActor`](crate::SliceActor).
//!
//! # Architecture Note
//! A slice is driven by **intents**. Every intent goes through the same three-step lifecycle:
//!
//! 1. [`AsyncSlice::on_pending`] runs inside the actor, reads the current state, moves it into
//!    its "loading" shape and returns the **request** that should go over the wire.
//! 2. [`AsyncSlice::fetch`] runs *outside* the state, as a concurrent in-flight task, with a
//!    clone of the injected `Context` (usually the API client).
//! 3. [`AsyncSlice::on_fulfilled`] or [`AsyncSlice::on_rejected`] runs inside the actor again,
//!    once the fetch settles.
//!
//! Because step 2 does not hold the state, two intents dispatched back to back are both in
//! flight at the same time, and their settle transitions are applied in the order the
//! responses arrive.
//!
//! We use "Associated Types" (type Intent, type Payload, etc.) to enforce type safety.
//! A page slice accepts a `PageIntent` and can't accidentally be sent a `CartIntent`.

use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any state container must implement to be managed by [`SliceActor`](crate::SliceActor).
///
/// # Async & Context
/// `fetch` is an associated async function (no `self`): it must not touch the state, only the
/// request it was handed and the `Context` injected at `run()` time ("Late Binding").
#[async_trait]
pub trait AsyncSlice: Send + 'static {
    /// What callers ask for (e.g., `PageIntent::next()`).
    type Intent: Send + Sync + Debug + 'static;

    /// The wire request derived from the intent and the current state.
    type Request: Send + Debug + 'static;

    /// The successful response of a fetch.
    type Payload: Send + Debug + 'static;

    /// The error type of a fetch.
    ///
    /// # Design Note: Errors live in state
    ///
    /// A rejected fetch is not returned to the caller as `Err`. It is handed to
    /// [`AsyncSlice::on_rejected`], which records it in the state, and the caller observes it in
    /// the snapshot. `Err` on the client side is reserved for [`FrameworkError`](crate::FrameworkError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// The runtime context (dependencies) cloned into every fetch.
    type Context: Clone + Send + Sync + 'static;

    /// Read-only view of the state handed to callers and observers.
    type Snapshot: Clone + Send + Sync + Debug + 'static;

    /// Apply the pending transition and build the request for this intent.
    fn on_pending(&mut self, intent: &Self::Intent) -> Self::Request;

    /// Perform the network call for a request.
    async fn fetch(ctx: Self::Context, request: Self::Request) -> Result<Self::Payload, Self::Error>;

    /// Apply a successful response.
    fn on_fulfilled(&mut self, intent: &Self::Intent, payload: Self::Payload);

    /// Apply a failed fetch. Prior successful state should be kept.
    fn on_rejected(&mut self, intent: &Self::Intent, error: &Self::Error);

    /// Produce the observable view of the state.
    fn snapshot(&self) -> Self::Snapshot;
}
