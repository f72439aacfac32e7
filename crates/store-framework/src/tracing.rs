//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: `Store started` / `Shutdown` with the slice type
//! - **Transitions**: `Pending` (debug, with the intent), `Fulfilled` (info), `Rejected` (warn, with the error)
//! - **Client Calls**: one span per instrumented client method
//! - **Rate Limiting**: dropped throttle calls and restarted debounce timers at `trace`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show intents and full payloads
//! RUST_LOG=debug cargo run
//!
//! # Filter to the framework only
//! RUST_LOG=store_framework=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Store started slice_type="PageState"
//! INFO load_first_page: Fulfilled slice_type="PageState" intent=PageIntent { target: First { keyword: "" }, merge: Replace }
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once: later calls leave the first subscriber in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use slice_type instead
        .compact() // Compact format shows spans inline (e.g., "search:load_first_page")
        .try_init();
}
