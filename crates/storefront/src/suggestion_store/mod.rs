//! # Suggestion Store
//!
//! Quick-lookup suggestions shown under the search box. Each answer replaces the previous list
//! wholesale. A failed lookup is logged by the actor and leaves the last suggestions in place.
//!
//! Lookups are rate-limited by the [`SearchCoordinator`](crate::search::SearchCoordinator), not
//! here: every dispatched lookup goes over the wire.

use crate::api::{ApiError, SharedApi};
use crate::clients::SuggestionClient;
use crate::model::ProductSummary;
use async_trait::async_trait;
use store_framework::{AsyncSlice, SliceActor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup(pub String);

#[derive(Debug, Default)]
pub struct SuggestionState {
    keyword: String,
    suggestions: Vec<ProductSummary>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionSnapshot {
    /// Keyword of the lookup that produced `suggestions`.
    pub keyword: String,
    pub suggestions: Vec<ProductSummary>,
}

#[async_trait]
impl AsyncSlice for SuggestionState {
    type Intent = Lookup;
    type Request = String;
    type Payload = Vec<ProductSummary>;
    type Error = ApiError;
    type Context = SharedApi;
    type Snapshot = SuggestionSnapshot;

    fn on_pending(&mut self, intent: &Lookup) -> String {
        intent.0.clone()
    }

    async fn fetch(api: SharedApi, keyword: String) -> Result<Vec<ProductSummary>, ApiError> {
        api.quick_search(&keyword).await
    }

    fn on_fulfilled(&mut self, intent: &Lookup, suggestions: Vec<ProductSummary>) {
        self.keyword = intent.0.clone();
        self.suggestions = suggestions;
    }

    fn on_rejected(&mut self, _intent: &Lookup, _error: &ApiError) {}

    fn snapshot(&self) -> SuggestionSnapshot {
        SuggestionSnapshot {
            keyword: self.keyword.clone(),
            suggestions: self.suggestions.clone(),
        }
    }
}

/// Creates a new suggestion store actor and its client.
pub fn new(buffer_size: usize) -> (SliceActor<SuggestionState>, SuggestionClient) {
    let (actor, generic_client) = SliceActor::new(SuggestionState::default(), buffer_size);
    (actor, SuggestionClient::new(generic_client))
}
