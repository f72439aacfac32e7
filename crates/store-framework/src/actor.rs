//! # Generic Slice Actor
//!
//! This module defines the `SliceActor`, the component that owns one slice of client state and
//! drives it through the pending → fetch → settle lifecycle. It implements the "Server" side of
//! the Actor Model: state transitions are applied sequentially inside one task, so the state
//! itself needs no `Mutex`.

use crate::client::SliceClient;
use crate::message::{Response, SliceRequest};
use crate::slice::AsyncSlice;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// A fetch that has completed and is waiting to be applied to the state.
struct Settled<S: AsyncSlice> {
    intent: S::Intent,
    result: Result<S::Payload, S::Error>,
    respond_to: Response<S::Snapshot>,
}

/// The generic actor that owns a single slice of state.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`state`), the receiver end
/// of the request channel, and the sending end of the snapshot `watch` channel.
///
/// **Concurrency Model**:
/// Transitions are applied one at a time, but fetches are not serialized. A `Dispatch` applies
/// its pending transition immediately and pushes the fetch into a [`JoinSet`]. The actor keeps
/// receiving requests while fetches are in flight, and applies each settle transition as soon as
/// its fetch completes. When two dispatches overlap, the response that settles **last**
/// overwrites the state, regardless of which was issued first. Nothing is cancelled.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `SliceActor::new()` with the initial state to get the `actor` and `client`.
/// 2.  **Wire**: Pass dependencies (the API client) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use store_framework::{AsyncSlice, SliceActor};
/// use async_trait::async_trait;
///
/// #[derive(Debug, Default)]
/// struct Counter { value: u32, loading: bool }
/// #[derive(Debug)] struct Never;
/// impl std::fmt::Display for Never {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "never") }
/// }
/// impl std::error::Error for Never {}
///
/// #[async_trait]
/// impl AsyncSlice for Counter {
///     type Intent = u32;
///     type Request = u32;
///     type Payload = u32;
///     type Error = Never;
///     type Context = ();
///     type Snapshot = u32;
///
///     fn on_pending(&mut self, intent: &u32) -> u32 { self.loading = true; *intent }
///     async fn fetch(_: (), request: u32) -> Result<u32, Never> { Ok(request * 2) }
///     fn on_fulfilled(&mut self, _: &u32, payload: u32) { self.loading = false; self.value += payload; }
///     fn on_rejected(&mut self, _: &u32, _: &Never) { self.loading = false; }
///     fn snapshot(&self) -> u32 { self.value }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = SliceActor::new(Counter::default(), 10);
///     tokio::spawn(actor.run(()));
///
///     let value = client.dispatch(21).await.unwrap();
///     assert_eq!(value, 42);
/// }
/// ```
pub struct SliceActor<S: AsyncSlice> {
    receiver: mpsc::Receiver<SliceRequest<S>>,
    state: S,
    publisher: watch::Sender<S::Snapshot>,
}

impl<S: AsyncSlice> SliceActor<S> {
    /// Creates a new `SliceActor` around `state` and its associated `SliceClient`.
    ///
    /// # Arguments
    ///
    /// * `state` - The initial state of the slice.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(state: S, buffer_size: usize) -> (Self, SliceClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, observer) = watch::channel(state.snapshot());
        let actor = Self {
            receiver,
            state,
            publisher,
        };
        let client = SliceClient::new(sender, observer);
        (actor, client)
    }

    /// Runs the actor's event loop until every client is dropped and every in-flight fetch
    /// has settled.
    ///
    /// # Context Injection
    /// The `context` argument is cloned into every fetch. This allows slices to reach external
    /// dependencies (like the HTTP API client) created *after* the actor was instantiated.
    pub async fn run(mut self, context: S::Context) {
        // Extract just the type name (e.g., "PageState" instead of "storefront::page_store::slice::PageState")
        let slice_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(slice_type, "Store started");

        let mut in_flight: JoinSet<Settled<S>> = JoinSet::new();
        let mut open = true;

        loop {
            tokio::select! {
                msg = self.receiver.recv(), if open => match msg {
                    Some(SliceRequest::Dispatch { intent, respond_to }) => {
                        debug!(slice_type, ?intent, "Pending");
                        let request = self.state.on_pending(&intent);
                        self.publish();

                        let ctx = context.clone();
                        in_flight.spawn(async move {
                            let result = S::fetch(ctx, request).await;
                            Settled { intent, result, respond_to }
                        });
                    }
                    Some(SliceRequest::Snapshot { respond_to }) => {
                        let _ = respond_to.send(Ok(self.state.snapshot()));
                    }
                    None => {
                        debug!(slice_type, in_flight = in_flight.len(), "All clients dropped");
                        open = false;
                    }
                },
                Some(joined) = in_flight.join_next() => match joined {
                    Ok(settled) => self.settle(slice_type, settled),
                    Err(e) => error!(slice_type, error = %e, "In-flight fetch failed to complete"),
                },
                else => break,
            }
        }

        info!(slice_type, "Shutdown");
    }

    fn settle(&mut self, slice_type: &str, settled: Settled<S>) {
        let Settled {
            intent,
            result,
            respond_to,
        } = settled;

        match result {
            Ok(payload) => {
                debug!(slice_type, ?payload, "Payload");
                self.state.on_fulfilled(&intent, payload);
                info!(slice_type, ?intent, "Fulfilled");
            }
            Err(e) => {
                warn!(slice_type, ?intent, error = %e, "Rejected");
                self.state.on_rejected(&intent, &e);
            }
        }

        let snapshot = self.publish();
        let _ = respond_to.send(Ok(snapshot));
    }

    fn publish(&self) -> S::Snapshot {
        let snapshot = self.state.snapshot();
        self.publisher.send_replace(snapshot.clone());
        snapshot
    }
}
