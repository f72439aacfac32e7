//! # Page Client
//!
//! One method per navigation. Each resolves with the snapshot taken right after its load
//! settled; a failed load resolves `Ok` with `status == Failed`.

use crate::page_store::{PageError, PageIntent, PageSnapshot, PageState};
use async_trait::async_trait;
use store_framework::{FrameworkError, SliceClient, StoreClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct PageClient {
    inner: SliceClient<PageState>,
}

impl PageClient {
    pub fn new(inner: SliceClient<PageState>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreClient<PageState> for PageClient {
    type Error = PageError;

    fn inner(&self) -> &SliceClient<PageState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        PageError::ActorCommunicationError(e.to_string())
    }
}

impl PageClient {
    async fn load(&self, intent: PageIntent) -> Result<PageSnapshot, PageError> {
        debug!("Sending request");
        self.inner.dispatch(intent).await.map_err(Self::map_error)
    }

    /// Page 1 under `keyword`, replacing the list.
    #[instrument(skip(self, keyword), fields(keyword = %keyword.as_ref()))]
    pub async fn load_first_page(
        &self,
        keyword: impl AsRef<str> + Send,
    ) -> Result<PageSnapshot, PageError> {
        self.load(PageIntent::first(keyword.as_ref())).await
    }

    #[instrument(skip(self))]
    pub async fn load_next_page(&self) -> Result<PageSnapshot, PageError> {
        self.load(PageIntent::next()).await
    }

    #[instrument(skip(self))]
    pub async fn load_previous_page(&self) -> Result<PageSnapshot, PageError> {
        self.load(PageIntent::previous()).await
    }

    #[instrument(skip(self))]
    pub async fn load_last_page(&self) -> Result<PageSnapshot, PageError> {
        self.load(PageIntent::last()).await
    }

    /// The next page appended after the current items (infinite scroll).
    #[instrument(skip(self))]
    pub async fn append_next_page(&self) -> Result<PageSnapshot, PageError> {
        self.load(PageIntent::append_next()).await
    }
}
