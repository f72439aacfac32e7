//! # Generic Messages
//!
//! This module defines the message types used for communication between
//! the [`SliceClient`](crate::SliceClient) and the [`SliceActor`](crate::SliceActor).

use crate::error::FrameworkError;
use crate::slice::AsyncSlice;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message type sent to the actor.
///
/// - **Dispatch**: run an intent through pending → fetch → settle. The reply is sent once the
///   fetch has settled, carrying the snapshot taken right after the settle transition.
/// - **Snapshot**: read the current state, ordered after every message sent before it.
#[derive(Debug)]
pub enum SliceRequest<S: AsyncSlice> {
    Dispatch {
        intent: S::Intent,
        respond_to: Response<S::Snapshot>,
    },
    Snapshot {
        respond_to: Response<S::Snapshot>,
    },
}
