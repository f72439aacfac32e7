//! # Generic Client
//!
//! This module defines the generic client for communicating with slice actors.

use crate::error::FrameworkError;
use crate::message::SliceRequest;
use crate::slice::AsyncSlice;
use tokio::sync::{mpsc, oneshot, watch};

/// ## SliceClient
///
/// The `SliceClient<S>` provides a type-safe, async API for interacting with a `SliceActor<S>`.
/// Intents are forwarded over a Tokio mpsc channel and replies come back on oneshot channels.
/// Snapshots are also published on a `watch` channel so any number of observers can follow the
/// state without sending messages.
///
/// * **Cloneable** – holds only a sender and a watch receiver.
/// * **Async API** – `dispatch` resolves once the intent's fetch has settled.
pub struct SliceClient<S: AsyncSlice> {
    sender: mpsc::Sender<SliceRequest<S>>,
    observer: watch::Receiver<S::Snapshot>,
}

impl<S: AsyncSlice> Clone for SliceClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            observer: self.observer.clone(),
        }
    }
}

impl<S: AsyncSlice> SliceClient<S> {
    pub fn new(sender: mpsc::Sender<SliceRequest<S>>, observer: watch::Receiver<S::Snapshot>) -> Self {
        Self { sender, observer }
    }

    /// Dispatches an intent and waits for it to settle.
    ///
    /// A rejected fetch is **not** an `Err` here: the returned snapshot carries the failure.
    pub async fn dispatch(&self, intent: S::Intent) -> Result<S::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Dispatch { intent, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Reads the state after every previously sent request has been received.
    pub async fn snapshot(&self) -> Result<S::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns a new observer of the published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<S::Snapshot> {
        self.observer.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> S::Snapshot {
        self.observer.borrow().clone()
    }
}
