//! # Rate Limiting
//!
//! Two timer-based wrappers around an async action, shared by every store consumer that needs to
//! keep a burst of UI events from turning into a burst of work.
//!
//! | | [`Debouncer`] | [`Throttler`] |
//! |---|---|---|
//! | **Runs** | once, `window` after the *last* call of a burst | at most once per `interval` |
//! | **Arguments** | of the last call | of the call that *opened* the window |
//! | **Calls while waiting** | restart the timer | are dropped |
//!
//! The throttle is the "leading-drop" variant: calls made while a timer is pending are discarded,
//! so the action never sees the freshest arguments of a burst, only the first ones.
//!
//! Both types need a running Tokio runtime: every call that schedules a timer spawns a task.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

type BoxedAction<A> = Arc<dyn Fn(A) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

fn boxed<A, F, Fut>(action: F) -> BoxedAction<A>
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |arg| Box::pin(action(arg)))
}

/// Delays an action until a quiet period of `window` follows the last call.
///
/// If calls never stop, the action never runs. Once the action has started it is not cancelled
/// by later calls; those only schedule the next run.
pub struct Debouncer<A> {
    window: Duration,
    action: BoxedAction<A>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Wraps `action` so it runs `window` after the last call of a burst.
    pub fn new<F, Fut>(window: Duration, action: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            window,
            action: boxed(action),
            timer: Mutex::new(None),
        }
    }

    /// The quiet period that must follow the last call.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restarts the timer with `arg` as the pending argument.
    pub fn call(&self, arg: A) {
        let action = Arc::clone(&self.action);
        let window = self.window;

        let mut timer = self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = timer.take() {
            if !previous.is_finished() {
                trace!("Debounce timer restarted");
            }
            previous.abort();
        }
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Detached so a later call's abort() only ever cancels a timer, never a running action.
            tokio::spawn(action(arg));
        }));
    }

    /// Drops the pending call, if any.
    pub fn cancel(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = timer.take() {
            previous.abort();
        }
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(pending) = timer.take() {
                pending.abort();
            }
        }
    }
}

/// Runs an action at most once per `interval` ("leading-drop" throttle).
///
/// The first call in a quiet period schedules the action `interval` later with its own
/// arguments. Every call made while that timer is pending is dropped. Once the timer fires a new
/// call may open a new window, even while the previous action is still running.
pub struct Throttler<A> {
    interval: Duration,
    action: BoxedAction<A>,
    pending: Arc<AtomicBool>,
}

impl<A: Send + 'static> Throttler<A> {
    /// Wraps `action` so it runs at most once per `interval`.
    pub fn new<F, Fut>(interval: Duration, action: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            interval,
            action: boxed(action),
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The delay between opening a window and running the action.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a window is currently open.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Opens a window with `arg`, or drops `arg` if one is already open.
    pub fn call(&self, arg: A) {
        if self.pending.swap(true, Ordering::AcqRel) {
            trace!("Throttled call dropped");
            return;
        }

        let action = Arc::clone(&self.action);
        let pending = Arc::clone(&self.pending);
        let interval = self.interval;
        tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            // The window closes when the timer fires, not when the action returns.
            pending.store(false, Ordering::Release);
            tokio::spawn(action(arg));
        });
    }
}
