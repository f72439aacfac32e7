//! [`AsyncSlice`] implementation for the paginated product list.
//!
//! Every intent turns into exactly one [`ListQuery`] computed from the state at the moment the
//! intent is received. Answers are merged when they settle, in whatever order they settle.

use super::actions::{MergeMode, PageIntent, PageTarget};
use crate::api::{ApiError, ListQuery, SharedApi};
use crate::model::{LoadStatus, ProductPage, ProductSummary};
use async_trait::async_trait;
use std::num::NonZeroU32;
use store_framework::AsyncSlice;

/// State of the paginated product list.
#[derive(Debug)]
pub struct PageState {
    items: Vec<ProductSummary>,
    current_page: u32,
    total_pages: u32,
    page_size: NonZeroU32,
    status: LoadStatus,
    error_message: Option<String>,
    keyword: String,
}

impl PageState {
    /// An empty, idle list on page 1 of 1.
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            page_size,
            status: LoadStatus::Idle,
            error_message: None,
            keyword: String::new(),
        }
    }

    fn requested_page(&self, target: &PageTarget) -> u32 {
        match target {
            PageTarget::First { .. } => 1,
            PageTarget::Next => self.current_page.saturating_add(1),
            PageTarget::Previous => self.current_page.saturating_sub(1).max(1),
            PageTarget::Last => self.total_pages,
        }
    }
}

/// What observers of the page store see.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    pub items: Vec<ProductSummary>,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: NonZeroU32,
    pub status: LoadStatus,
    /// Present only when `status` is [`LoadStatus::Failed`].
    pub error_message: Option<String>,
    /// Keyword the items were loaded under.
    pub keyword: String,
}

impl PageSnapshot {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

#[async_trait]
impl AsyncSlice for PageState {
    type Intent = PageIntent;
    type Request = ListQuery;
    type Payload = ProductPage;
    type Error = ApiError;
    type Context = SharedApi;
    type Snapshot = PageSnapshot;

    fn on_pending(&mut self, intent: &PageIntent) -> ListQuery {
        self.status = LoadStatus::Loading;
        self.error_message = None;

        let keyword = match &intent.target {
            PageTarget::First { keyword } => keyword.clone(),
            _ => self.keyword.clone(),
        };
        ListQuery::new(self.requested_page(&intent.target), self.page_size, keyword)
    }

    async fn fetch(api: SharedApi, query: ListQuery) -> Result<ProductPage, ApiError> {
        api.list_products(&query).await
    }

    /// Merges the page and takes `current_page` and `total_pages` from the answer.
    fn on_fulfilled(&mut self, intent: &PageIntent, page: ProductPage) {
        match intent.merge {
            MergeMode::Replace => self.items = page.products,
            MergeMode::Append => self.items.extend(page.products),
        }
        self.current_page = page.current_page;
        self.total_pages = page.total_pages;
        if let PageTarget::First { keyword } = &intent.target {
            self.keyword = keyword.clone();
        }
        self.status = LoadStatus::Succeeded;
        self.error_message = None;
    }

    /// Items and page numbers are kept as they were before the failed load.
    fn on_rejected(&mut self, _intent: &PageIntent, error: &ApiError) {
        self.status = LoadStatus::Failed;
        self.error_message = Some(error.to_string());
    }

    fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            items: self.items.clone(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            status: self.status,
            error_message: self.error_message.clone(),
            keyword: self.keyword.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::sample_product;

    fn size() -> NonZeroU32 {
        NonZeroU32::new(8).unwrap()
    }

    fn page(range: std::ops::RangeInclusive<usize>, current: u32, total: u32) -> ProductPage {
        ProductPage {
            products: range.map(sample_product).collect(),
            current_page: current,
            total_pages: total,
        }
    }

    #[test]
    fn test_requested_pages() {
        let mut state = PageState::new(size());
        state.current_page = 2;
        state.total_pages = 5;
        state.keyword = "lamp".into();

        assert_eq!(state.on_pending(&PageIntent::next()).page, 3);
        assert_eq!(state.on_pending(&PageIntent::previous()).page, 1);
        assert_eq!(state.on_pending(&PageIntent::last()).page, 5);

        let first = state.on_pending(&PageIntent::first("desk"));
        assert_eq!((first.page, first.keyword.as_str()), (1, "desk"));
        assert_eq!(state.on_pending(&PageIntent::append_next()).keyword, "lamp");
    }

    #[test]
    fn test_previous_never_requests_page_zero() {
        let mut state = PageState::new(size());
        assert_eq!(state.on_pending(&PageIntent::previous()).page, 1);
    }

    #[test]
    fn test_pending_clears_error() {
        let mut state = PageState::new(size());
        state.on_rejected(&PageIntent::next(), &ApiError::Network("down".into()));
        assert_eq!(state.snapshot().status, LoadStatus::Failed);

        state.on_pending(&PageIntent::next());
        let snapshot = state.snapshot();
        assert_eq!(snapshot.status, LoadStatus::Loading);
        assert_eq!(snapshot.error_message, None);
    }

    #[test]
    fn test_append_concatenates_and_replace_overwrites() {
        let mut state = PageState::new(size());
        state.on_fulfilled(&PageIntent::first(""), page(1..=8, 1, 3));
        state.on_fulfilled(&PageIntent::append_next(), page(9..=16, 2, 3));
        assert_eq!(state.snapshot().items.len(), 16);

        state.on_fulfilled(&PageIntent::last(), page(17..=20, 3, 3));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.items.len(), 4);
        assert_eq!(snapshot.current_page, 3);
        assert!(!snapshot.has_next_page());
        assert!(snapshot.has_previous_page());
    }

    #[test]
    fn test_keyword_recorded_only_by_first_page() {
        let mut state = PageState::new(size());
        state.on_fulfilled(&PageIntent::first("mug"), page(1..=2, 1, 1));
        state.on_fulfilled(&PageIntent::next(), page(3..=4, 1, 1));
        assert_eq!(state.snapshot().keyword, "mug");
    }
}
