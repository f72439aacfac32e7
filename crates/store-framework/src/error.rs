//! # Framework Errors
//!
//! This module defines the common error types used throughout the store framework.
//! Fetch failures are not listed here: they are recorded in slice state.

/// Errors that can occur within the store framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
}
