//! # Mock Framework & Testing Guide
//!
//! The `MockClient<S>` type hands out a real `SliceClient<S>` whose requests are answered from a
//! queue of expectations instead of a running slice actor. It lets you test code that *drives* a
//! store (coordinators, client wrappers) without any network or actor.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn + fetch) |
//! | **Determinism** | 100% Deterministic | Subject to fetch timing |
//! | **State** | No real state (expectations) | Real transitions |
//! | **Use Case** | Testing logic *around* the client | Testing the slice itself or the full system |
//!
//! ## Example
//!
//! ```rust
//! use store_framework::mock::MockClient;
//! use store_framework::{AsyncSlice, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Debug, Default)] struct Flag(bool);
//! #[derive(Debug, thiserror::Error)] #[error("flag error")] struct FlagError;
//!
//! #[async_trait]
//! impl AsyncSlice for Flag {
//!     type Intent = bool; type Request = bool; type Payload = bool; type Error = FlagError;
//!     type Context = (); type Snapshot = bool;
//!     fn on_pending(&mut self, intent: &bool) -> bool { *intent }
//!     async fn fetch(_: (), request: bool) -> Result<bool, FlagError> { Ok(request) }
//!     fn on_fulfilled(&mut self, _: &bool, payload: bool) { self.0 = payload; }
//!     fn on_rejected(&mut self, _: &bool, _: &FlagError) {}
//!     fn snapshot(&self) -> bool { self.0 }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Flag>::new(false);
//!     mock.expect_dispatch().matching(|intent| *intent).return_ok(true);
//!     mock.expect_snapshot().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.dispatch(true).await, Ok(true));
//!     assert_eq!(client.snapshot().await, Err(FrameworkError::ActorClosed));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and the raw receiver, or the fluent [`MockClient`].

use crate::client::SliceClient;
use crate::error::FrameworkError;
use crate::message::{Response, SliceRequest};
use crate::slice::AsyncSlice;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

type IntentMatcher<S> = Box<dyn Fn(&<S as AsyncSlice>::Intent) -> bool + Send>;

/// Represents an expected request to the mock client.
enum Expectation<S: AsyncSlice> {
    Dispatch {
        matcher: Option<IntentMatcher<S>>,
        response: Result<S::Snapshot, FrameworkError>,
    },
    Snapshot {
        response: Result<S::Snapshot, FrameworkError>,
    },
}

type Expectations<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<S: AsyncSlice> {
    client: SliceClient<S>,
    publisher: watch::Sender<S::Snapshot>,
    expectations: Expectations<S>,
    mismatches: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: AsyncSlice> MockClient<S> {
    /// Creates a new mock client with no expectations, publishing `initial` to observers.
    pub fn new(initial: S::Snapshot) -> Self {
        let (sender, mut receiver) = mpsc::channel::<SliceRequest<S>>(100);
        let (publisher, observer) = watch::channel(initial);
        let expectations: Expectations<S> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(AtomicUsize::new(0));

        let expectations_clone = expectations.clone();
        let mismatches_clone = mismatches.clone();
        let publisher_clone = publisher.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();

                match (request, expectation) {
                    (
                        SliceRequest::Dispatch { intent, respond_to },
                        Some(Expectation::Dispatch { matcher, response }),
                    ) => {
                        if matcher.is_some_and(|matches| !matches(&intent)) {
                            mismatches_clone.fetch_add(1, Ordering::SeqCst);
                            // Dropping the responder surfaces as ActorDropped at the call site.
                            continue;
                        }
                        if let Ok(snapshot) = &response {
                            publisher_clone.send_replace(snapshot.clone());
                        }
                        let _ = respond_to.send(response);
                    }
                    (SliceRequest::Snapshot { respond_to }, Some(Expectation::Snapshot { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        mismatches_clone.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
        });

        Self {
            client: SliceClient::new(sender, observer),
            publisher,
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> SliceClient<S> {
        self.client.clone()
    }

    /// Publishes a snapshot to observers without any request.
    pub fn publish(&self, snapshot: S::Snapshot) {
        self.publisher.send_replace(snapshot);
    }

    /// Expects a `dispatch` operation.
    pub fn expect_dispatch(&mut self) -> DispatchExpectationBuilder<S> {
        DispatchExpectationBuilder {
            matcher: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` operation.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<S> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met and no request was unexpected.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
        let mismatches = self.mismatches.load(Ordering::SeqCst);
        if mismatches != 0 {
            panic!("{} request(s) did not match their expectation", mismatches);
        }
    }
}

/// Builder for `dispatch` expectations.
pub struct DispatchExpectationBuilder<S: AsyncSlice> {
    matcher: Option<IntentMatcher<S>>,
    expectations: Expectations<S>,
}

impl<S: AsyncSlice> DispatchExpectationBuilder<S> {
    /// Only accept intents for which `matcher` returns true.
    pub fn matching(mut self, matcher: impl Fn(&S::Intent) -> bool + Send + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, snapshot: S::Snapshot) {
        self.push(Ok(snapshot));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S::Snapshot, FrameworkError>) {
        let mut exps = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        exps.push_back(Expectation::Dispatch {
            matcher: self.matcher,
            response,
        });
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<S: AsyncSlice> {
    expectations: Expectations<S>,
}

impl<S: AsyncSlice> SnapshotExpectationBuilder<S> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, snapshot: S::Snapshot) {
        self.push(Ok(snapshot));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S::Snapshot, FrameworkError>) {
        let mut exps = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        exps.push_back(Expectation::Snapshot { response });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// Instead of a running actor, the test owns the `receiver`: it can inspect each intent as it
/// arrives and decide when (and with what) to answer, which makes ordering-sensitive scenarios
/// deterministic.
pub fn create_mock_client<S: AsyncSlice>(
    buffer_size: usize,
    initial: S::Snapshot,
) -> (SliceClient<S>, mpsc::Receiver<SliceRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_publisher, observer) = watch::channel(initial);
    (SliceClient::new(sender, observer), receiver)
}

/// Helper to verify that the next message is a Dispatch request
pub async fn expect_dispatch<S: AsyncSlice>(
    receiver: &mut mpsc::Receiver<SliceRequest<S>>,
) -> Option<(S::Intent, Response<S::Snapshot>)> {
    match receiver.recv().await {
        Some(SliceRequest::Dispatch { intent, respond_to }) => Some((intent, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<S: AsyncSlice>(
    receiver: &mut mpsc::Receiver<SliceRequest<S>>,
) -> Option<Response<S::Snapshot>> {
    match receiver.recv().await {
        Some(SliceRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
