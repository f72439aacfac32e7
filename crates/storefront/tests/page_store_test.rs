use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use store_framework::StoreClient;
use storefront::api::mock::MockApi;
use storefront::api::{ApiError, SharedApi};
use storefront::clients::PageClient;
use storefront::model::LoadStatus;
use storefront::page_store::{self, PageSnapshot};

// --- Helpers ---

fn start(api: &Arc<MockApi>) -> PageClient {
    let (actor, client) = page_store::new(NonZeroU32::new(8).unwrap(), 32);
    let shared: SharedApi = api.clone();
    tokio::spawn(actor.run(shared));
    client
}

fn ids(snapshot: &PageSnapshot) -> Vec<String> {
    snapshot.items.iter().map(|p| p.id.0.clone()).collect()
}

fn range_ids(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|n| n.to_string()).collect()
}

fn assert_bounds(snapshot: &PageSnapshot) {
    assert!(
        snapshot.current_page >= 1 && snapshot.current_page <= snapshot.total_pages,
        "page {} of {}",
        snapshot.current_page,
        snapshot.total_pages
    );
}

// --- Scenarios ---

#[tokio::test]
async fn test_empty_catalog() {
    let api = Arc::new(MockApi::default());
    let pages = start(&api);

    let snapshot = pages.load_first_page("").await.unwrap();

    assert_eq!(snapshot.status, LoadStatus::Succeeded);
    assert!(snapshot.items.is_empty());
    assert_eq!((snapshot.current_page, snapshot.total_pages), (1, 1));
    assert!(!snapshot.has_next_page());
    assert!(!snapshot.has_previous_page());
}

#[tokio::test]
async fn test_three_pages_of_eight() {
    let api = Arc::new(MockApi::with_products(20));
    let pages = start(&api);

    let first = pages.load_first_page("").await.unwrap();
    assert_eq!(ids(&first), range_ids(1..=8));
    assert_eq!(first.total_pages, 3);

    let second = pages.load_next_page().await.unwrap();
    assert_eq!(ids(&second), range_ids(9..=16));
    assert_eq!(second.current_page, 2);

    let last = pages.load_last_page().await.unwrap();
    assert_eq!(ids(&last), range_ids(17..=20));
    assert_eq!(last.current_page, 3);
    assert!(!last.has_next_page());

    let back = pages.load_previous_page().await.unwrap();
    assert_eq!(back.current_page, 2);
    assert_eq!(ids(&back), range_ids(9..=16));
}

#[tokio::test]
async fn test_next_past_last_page_fails_in_state() {
    let api = Arc::new(MockApi::with_products(20));
    let pages = start(&api);

    let last = pages.load_last_page().await.unwrap();
    assert_eq!((last.current_page, last.total_pages), (3, 3));

    // Not guarded by the store: the request goes out and the server rejects it.
    let overflow = pages.load_next_page().await.unwrap();
    assert_eq!(api.list_calls().pop().unwrap().page, 4);
    assert_eq!(overflow.status, LoadStatus::Failed);
    assert!(overflow
        .error_message
        .as_deref()
        .is_some_and(|message| !message.is_empty()));
    assert_eq!(overflow.current_page, 3);
    assert_eq!(ids(&overflow), range_ids(17..=20));
    assert_bounds(&overflow);
}

#[tokio::test]
async fn test_infinite_scroll_appends() {
    let api = Arc::new(MockApi::with_products(30));
    let pages = start(&api);

    assert_eq!(pages.load_first_page("").await.unwrap().items.len(), 8);
    assert_eq!(pages.append_next_page().await.unwrap().items.len(), 16);

    let third = pages.append_next_page().await.unwrap();
    assert_eq!(ids(&third), range_ids(1..=24));
    assert_eq!(third.current_page, 3);
}

#[tokio::test]
async fn test_failed_load_keeps_items() {
    let api = Arc::new(MockApi::with_products(20));
    let pages = start(&api);

    let loaded = pages.load_first_page("").await.unwrap();
    api.fail_next_list(ApiError::Network("connection reset".into()));

    let failed = pages.load_next_page().await.unwrap();
    assert_eq!(failed.status, LoadStatus::Failed);
    assert_eq!(
        failed.error_message.as_deref(),
        Some("Network error: connection reset")
    );
    assert_eq!(failed.items, loaded.items);
    assert_eq!(failed.current_page, 1);

    // Retrying is just calling again.
    let retried = pages.load_next_page().await.unwrap();
    assert_eq!(retried.status, LoadStatus::Succeeded);
    assert_eq!(retried.error_message, None);
    assert_eq!(retried.current_page, 2);
}

#[tokio::test]
async fn test_server_error_reported_in_state() {
    let api = Arc::new(MockApi::with_products(20));
    let pages = start(&api);
    api.fail_next_list(ApiError::Server {
        status: 500,
        message: "boom".into(),
    });

    let snapshot = pages.load_first_page("").await.unwrap();
    assert_eq!(snapshot.status, LoadStatus::Failed);
    assert_eq!(snapshot.error_message.as_deref(), Some("Server error 500: boom"));
    assert!(snapshot.items.is_empty());
}

// --- Properties ---

#[tokio::test]
async fn test_page_bounds_after_every_success() {
    let api = Arc::new(MockApi::with_products(20));
    let pages = start(&api);

    let snapshots = vec![
        pages.load_first_page("").await.unwrap(),
        pages.load_next_page().await.unwrap(),
        pages.load_last_page().await.unwrap(),
        pages.load_previous_page().await.unwrap(),
        pages.load_previous_page().await.unwrap(),
        pages.append_next_page().await.unwrap(),
    ];
    for snapshot in &snapshots {
        assert_eq!(snapshot.status, LoadStatus::Succeeded);
        assert_bounds(snapshot);
    }
}

#[tokio::test]
async fn test_first_page_is_idempotent() {
    let api = Arc::new(MockApi::with_products(20));
    let pages = start(&api);

    let once = pages.load_first_page("product").await.unwrap();
    let twice = pages.load_first_page("product").await.unwrap();

    assert_eq!(once.items, twice.items);
    assert_eq!(twice.current_page, 1);
}

#[tokio::test]
async fn test_keyword_resets_pagination() {
    let api = Arc::new(MockApi::with_products(30));
    let pages = start(&api);

    pages.load_first_page("").await.unwrap();
    pages.append_next_page().await.unwrap();
    pages.append_next_page().await.unwrap();

    let filtered = pages.load_first_page("product 2").await.unwrap();
    assert_eq!(filtered.current_page, 1);
    assert_eq!(filtered.keyword, "product 2");
    // "Product 2" and "Product 20".."Product 29": 11 matches, first page holds 8.
    assert_eq!(filtered.items.len(), 8);
    assert_eq!(filtered.total_pages, 2);

    let last_call = api.list_calls().pop().unwrap();
    assert_eq!((last_call.page, last_call.keyword.as_str()), (1, "product 2"));

    // Navigation keeps the committed keyword.
    pages.load_next_page().await.unwrap();
    let next_call = api.list_calls().pop().unwrap();
    assert_eq!((next_call.page, next_call.keyword.as_str()), (2, "product 2"));
}

#[tokio::test]
async fn test_append_keeps_previous_items_as_prefix() {
    let api = Arc::new(MockApi::with_products(30));
    let pages = start(&api);

    let mut previous = pages.load_first_page("").await.unwrap().items;
    for _ in 0..3 {
        let next = pages.append_next_page().await.unwrap().items;
        assert!(next.len() >= previous.len());
        assert_eq!(&next[..previous.len()], &previous[..]);
        previous = next;
    }
    assert_eq!(previous.len(), 30);
}

#[tokio::test]
async fn test_previous_on_first_page_requests_page_one() {
    let api = Arc::new(MockApi::with_products(20));
    let pages = start(&api);

    pages.load_first_page("").await.unwrap();
    let snapshot = pages.load_previous_page().await.unwrap();

    assert_eq!(snapshot.status, LoadStatus::Succeeded);
    assert_eq!(snapshot.current_page, 1);
    assert!(api.list_calls().iter().all(|call| call.page >= 1));
}

#[tokio::test]
async fn test_request_carries_page_size() {
    let api = Arc::new(MockApi::with_products(3));
    let pages = start(&api);

    pages.load_first_page("").await.unwrap();
    assert_eq!(api.list_calls()[0].limit.get(), 8);
}

// --- Concurrency ---

#[tokio::test(start_paused = true)]
async fn test_last_settled_navigation_wins() {
    let api = Arc::new(MockApi::with_products(20));
    let pages = start(&api);
    pages.load_first_page("").await.unwrap();

    api.delay_page(2, Duration::from_millis(300));
    api.delay_page(3, Duration::from_millis(10));

    // Next (page 2) is issued first but answers last.
    let (next, last) = tokio::join!(pages.load_next_page(), pages.load_last_page());
    assert_eq!(last.unwrap().current_page, 3);
    assert_eq!(next.unwrap().current_page, 2);

    let settled = pages.snapshot().await.unwrap();
    assert_eq!(settled.current_page, 2);
    assert_eq!(ids(&settled), range_ids(9..=16));
}

#[tokio::test(start_paused = true)]
async fn test_observers_see_loading_then_result() {
    let api = Arc::new(MockApi::with_products(20));
    api.delay_page(1, Duration::from_millis(50));
    let pages = start(&api);
    let mut observer = pages.subscribe();
    assert_eq!(observer.borrow().status, LoadStatus::Idle);

    let load = tokio::spawn({
        let pages = pages.clone();
        async move { pages.load_first_page("").await }
    });

    observer.changed().await.unwrap();
    assert!(observer.borrow_and_update().is_loading());

    observer.changed().await.unwrap();
    assert_eq!(observer.borrow_and_update().status, LoadStatus::Succeeded);
    assert_eq!(load.await.unwrap().unwrap(), pages.latest());
}
