//! # Store Framework
//!
//! This crate provides the building blocks for client-side state containers ("slices") that are
//! driven by asynchronous intents and observed by a rendering layer. It implements a
//! **thunk-style** lifecycle (pending → fetch → fulfilled/rejected) on top of the **Actor Model**.
//!
//! ## Why Actors for UI State?
//!
//! - **Isolated state**: each slice is owned by exactly one Tokio task. Nobody else writes to it.
//! - **Sequential transitions**: pending and settle transitions never interleave mid-way.
//! - **Unrestricted reads**: snapshots are published on a `watch` channel, so any number of
//!   observers can follow the state without talking to the actor.
//!
//! ## Architecture
//!
//! 1. **Slice Layer** ([`AsyncSlice`]) - Your state and its transitions
//! 2. **Runtime Layer** ([`SliceActor`]) - Message processing and in-flight fetches
//! 3. **Interface Layer** ([`SliceClient`], [`StoreClient`]) - Type-safe communication
//!
//! Rate limiting for UI event streams ([`Debouncer`], [`Throttler`]) lives in [`rate_limit`].
//!
//! ## Concurrency Model
//!
//! Fetches are **not** serialized. Two intents dispatched back to back both go over the wire and
//! the one whose response settles last wins. Consumers that care should not dispatch while the
//! slice reports it is loading.
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MockClient`](mock::MockClient) that answers requests from a
//! queue of expectations, so code that drives a store can be tested without any actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod rate_limit;
pub mod slice;
pub mod tracing;

// Re-export core types for convenience
pub use actor::SliceActor;
pub use client::SliceClient;
pub use client_trait::StoreClient;
pub use error::FrameworkError;
pub use message::{Response, SliceRequest};
pub use rate_limit::{Debouncer, Throttler};
pub use slice::AsyncSlice;
