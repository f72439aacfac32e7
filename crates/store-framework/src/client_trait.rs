//! # StoreClient Trait
//!
//! Provides a common interface for store-specific clients, adding default `snapshot`,
//! `subscribe` and `latest` methods built on top of a generic `SliceClient`.
use crate::{AsyncSlice, FrameworkError, SliceClient};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for store-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust
/// use store_framework::{AsyncSlice, FrameworkError, SliceClient, StoreClient};
/// use async_trait::async_trait;
///
/// #[derive(Debug, Default)] struct Flag(bool);
/// #[derive(Debug, thiserror::Error)] #[error("flag error: {0}")] struct FlagError(String);
///
/// #[async_trait]
/// impl AsyncSlice for Flag {
///     type Intent = bool; type Request = bool; type Payload = bool; type Error = FlagError;
///     type Context = (); type Snapshot = bool;
///     fn on_pending(&mut self, intent: &bool) -> bool { *intent }
///     async fn fetch(_: (), request: bool) -> Result<bool, FlagError> { Ok(request) }
///     fn on_fulfilled(&mut self, _: &bool, payload: bool) { self.0 = payload; }
///     fn on_rejected(&mut self, _: &bool, _: &FlagError) {}
///     fn snapshot(&self) -> bool { self.0 }
/// }
///
/// struct FlagClient { inner: SliceClient<Flag> }
///
/// #[async_trait]
/// impl StoreClient<Flag> for FlagClient {
///     type Error = FlagError;
///     fn inner(&self) -> &SliceClient<Flag> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { FlagError(e.to_string()) }
/// }
///
/// async fn usage(client: FlagClient) {
///     // snapshot() and subscribe() are provided automatically!
///     let _ = client.snapshot().await;
///     let _ = client.subscribe();
/// }
/// ```
#[async_trait]
pub trait StoreClient<S: AsyncSlice>: Send + Sync {
    /// The store-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic SliceClient.
    fn inner(&self) -> &SliceClient<S>;

    /// Map framework errors to the store-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Read the current state, ordered after previously dispatched intents.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S::Snapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Observe every published snapshot.
    fn subscribe(&self) -> watch::Receiver<S::Snapshot> {
        self.inner().subscribe()
    }

    /// The most recently published snapshot, without a round trip to the actor.
    fn latest(&self) -> S::Snapshot {
        self.inner().latest()
    }
}
