use crate::search::SearchError;
use crate::suggestion_store::{Lookup, SuggestionSnapshot, SuggestionState};
use async_trait::async_trait;
use store_framework::{FrameworkError, SliceClient, StoreClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SuggestionClient {
    inner: SliceClient<SuggestionState>,
}

impl SuggestionClient {
    pub fn new(inner: SliceClient<SuggestionState>) -> Self {
        Self { inner }
    }

    /// Fetches suggestions for `keyword` right away. Rate limiting is the caller's business.
    #[instrument(skip(self))]
    pub async fn lookup(&self, keyword: String) -> Result<SuggestionSnapshot, SearchError> {
        debug!("Sending request");
        self.inner
            .dispatch(Lookup(keyword))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl StoreClient<SuggestionState> for SuggestionClient {
    type Error = SearchError;

    fn inner(&self) -> &SliceClient<SuggestionState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        SearchError::ActorCommunicationError(e.to_string())
    }
}
