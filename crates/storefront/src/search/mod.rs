//! # Search Coordinator
//!
//! Glue between the search box and the stores:
//!
//! - [`SearchCoordinator::set_keyword`] commits a keyword and reloads the list from page 1
//! - [`SearchCoordinator::quick_lookup`] feeds keystrokes to a [`Debouncer`], so only the last
//!   value of a typing burst reaches the suggestion store
//!
//! The coordinator is the only path that resets pagination. Viewport handling lives in
//! [`viewport`].

pub mod viewport;

pub use viewport::{RenderMode, ViewportObserver};

use crate::clients::{PageClient, SuggestionClient};
use crate::page_store::{PageError, PageSnapshot};
use crate::suggestion_store::SuggestionSnapshot;
use std::time::Duration;
use store_framework::{Debouncer, StoreClient};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error(transparent)]
    Page(#[from] PageError),

    /// An error occurred while communicating with the suggestion store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

pub struct SearchCoordinator {
    pages: PageClient,
    suggestions: SuggestionClient,
    keyword: watch::Sender<String>,
    lookup: Debouncer<String>,
}

impl SearchCoordinator {
    pub fn new(pages: PageClient, suggestions: SuggestionClient, debounce: Duration) -> Self {
        let lookup_client = suggestions.clone();
        let lookup = Debouncer::new(debounce, move |keyword: String| {
            let client = lookup_client.clone();
            async move {
                if let Err(e) = client.lookup(keyword).await {
                    warn!(error = %e, "Quick lookup failed");
                }
            }
        });

        Self {
            pages,
            suggestions,
            keyword: watch::Sender::new(String::new()),
            lookup,
        }
    }

    /// Commits `value` as the active keyword and loads page 1 under it.
    ///
    /// The keyword is visible to observers before the load starts. If the load fails it stays
    /// committed here, while the page store keeps the keyword of the items it still holds, so
    /// next/previous/append keep querying under that older keyword.
    #[instrument(skip(self, value))]
    pub async fn set_keyword(&self, value: impl Into<String>) -> Result<PageSnapshot, SearchError> {
        let value = value.into();
        info!(keyword = %value, "Keyword committed");
        self.keyword.send_replace(value.clone());
        Ok(self.pages.load_first_page(value).await?)
    }

    /// Schedules a suggestion lookup for `value`, replacing any lookup still waiting out the
    /// debounce window. Never touches the product list.
    pub fn quick_lookup(&self, value: impl Into<String>) {
        self.lookup.call(value.into());
    }

    /// Drops the lookup waiting in the debounce window, if any.
    pub fn cancel_lookup(&self) {
        self.lookup.cancel();
    }

    pub fn keyword(&self) -> String {
        self.keyword.borrow().clone()
    }

    pub fn subscribe_keyword(&self) -> watch::Receiver<String> {
        self.keyword.subscribe()
    }

    pub fn subscribe_suggestions(&self) -> watch::Receiver<SuggestionSnapshot> {
        self.suggestions.subscribe()
    }

    pub fn suggestions(&self) -> SuggestionSnapshot {
        self.suggestions.latest()
    }

    pub fn pages(&self) -> &PageClient {
        &self.pages
    }
}
