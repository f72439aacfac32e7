//! Error types for the page store client.

use thiserror::Error;

/// Errors returned by [`PageClient`](crate::clients::PageClient).
///
/// A failed page load is not one of them: it shows up in the snapshot as
/// [`LoadStatus::Failed`](crate::model::LoadStatus::Failed).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PageError {
    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PageError {
    fn from(msg: String) -> Self {
        PageError::ActorCommunicationError(msg)
    }
}
