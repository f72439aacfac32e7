use std::sync::Arc;
use std::time::Duration;
use storefront::api::mock::MockApi;
use storefront::api::ApiError;
use storefront::auth::Session;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::Storefront;
use storefront::model::{LoadStatus, ProductSummary};
use storefront::search::RenderMode;
use tokio::time::{sleep, Instant};

fn catalog() -> Vec<ProductSummary> {
    vec![
        ProductSummary::new("1", "Laptop", 8999.0),
        ProductSummary::new("2", "Lamp", 49.0),
        ProductSummary::new("3", "Lap desk", 120.0),
        ProductSummary::new("4", "Office chair", 1299.0),
    ]
}

fn system(api: &Arc<MockApi>) -> Storefront {
    Storefront::new(&StorefrontConfig::default(), api.clone(), Session::new())
}

#[tokio::test]
async fn test_set_keyword_commits_and_reloads_first_page() {
    let api = Arc::new(MockApi::new(catalog()));
    let system = system(&api);
    let keyword = system.search.subscribe_keyword();

    let snapshot = system.search.set_keyword("lap").await.unwrap();

    assert_eq!(*keyword.borrow(), "lap");
    assert_eq!(system.search.keyword(), "lap");
    assert_eq!(snapshot.status, LoadStatus::Succeeded);
    assert_eq!(snapshot.current_page, 1);
    let names: Vec<_> = snapshot.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Laptop", "Lap desk"]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_keyword_load_keeps_list_keyword() {
    let api = Arc::new(MockApi::with_products(30));
    let system = system(&api);

    system.search.set_keyword("product 1").await.unwrap();
    api.fail_next_list(ApiError::Network("connection reset".into()));

    let failed = system.search.set_keyword("desk").await.unwrap();
    assert_eq!(failed.status, LoadStatus::Failed);
    assert_eq!(system.search.keyword(), "desk");
    assert_eq!(failed.keyword, "product 1");

    // Navigation follows the keyword of the loaded items.
    system.pages.load_next_page().await.unwrap();
    let next_call = api.list_calls().pop().unwrap();
    assert_eq!((next_call.page, next_call.keyword.as_str()), (2, "product 1"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_set_keyword_resets_scrolled_list() {
    let api = Arc::new(MockApi::with_products(30));
    let system = system(&api);

    system.search.set_keyword("").await.unwrap();
    system.pages.append_next_page().await.unwrap();
    let scrolled = system.pages.append_next_page().await.unwrap();
    assert_eq!(scrolled.items.len(), 24);

    let reset = system.search.set_keyword("product 1").await.unwrap();
    assert_eq!(reset.current_page, 1);
    assert_eq!(reset.keyword, "product 1");
    assert!(reset.items.iter().all(|p| p.name.to_lowercase().contains("product 1")));
    assert_eq!(reset.items.len(), 8);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_quick_lookup_debounces_a_typing_burst() {
    let api = Arc::new(MockApi::new(catalog()));
    let system = system(&api);
    let start = Instant::now();

    system.search.quick_lookup("l");
    sleep(Duration::from_millis(50)).await;
    system.search.quick_lookup("la");
    sleep(Duration::from_millis(50)).await;
    system.search.quick_lookup("lap");

    sleep(Duration::from_millis(299)).await;
    assert!(api.search_calls().is_empty(), "looked up before the window elapsed");

    let mut suggestions = system.search.subscribe_suggestions();
    let snapshot = suggestions
        .wait_for(|snapshot| snapshot.keyword == "lap")
        .await
        .unwrap()
        .clone();
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_millis(400) && elapsed < Duration::from_millis(410),
        "looked up at {elapsed:?}"
    );

    assert_eq!(snapshot.suggestions.len(), 2);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(api.search_calls(), ["lap"]);
    // Quick lookups never touch the product list.
    assert!(api.list_calls().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_new_lookup_replaces_suggestions() {
    let api = Arc::new(MockApi::new(catalog()));
    let system = system(&api);

    system.search.quick_lookup("lap");
    sleep(Duration::from_millis(500)).await;
    assert_eq!(system.search.suggestions().suggestions.len(), 2);

    system.search.quick_lookup("chair");
    sleep(Duration::from_millis(500)).await;
    let snapshot = system.search.suggestions();
    assert_eq!(snapshot.keyword, "chair");
    assert_eq!(snapshot.suggestions.len(), 1);
    assert_eq!(snapshot.suggestions[0].name, "Office chair");

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failed_lookup_keeps_previous_suggestions() {
    let api = Arc::new(MockApi::new(catalog()));
    let system = system(&api);

    system.search.quick_lookup("lap");
    sleep(Duration::from_millis(500)).await;
    let before = system.search.suggestions();

    api.fail_next_search(ApiError::Network("offline".into()));
    system.search.quick_lookup("chair");
    sleep(Duration::from_millis(500)).await;

    assert_eq!(api.search_calls(), ["lap", "chair"]);
    assert_eq!(system.search.suggestions(), before);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_lookup_never_fires() {
    let api = Arc::new(MockApi::new(catalog()));
    let system = system(&api);

    system.search.quick_lookup("lap");
    sleep(Duration::from_millis(100)).await;
    system.search.cancel_lookup();
    sleep(Duration::from_millis(500)).await;

    assert!(api.search_calls().is_empty());
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_resize_burst_is_throttled() {
    let api = Arc::new(MockApi::new(catalog()));
    let system = system(&api);
    assert_eq!(system.viewport.mode(), RenderMode::Paged);

    let mut observer = system.viewport.subscribe();
    let recorder = tokio::spawn(async move {
        let mut changes = Vec::new();
        while observer.changed().await.is_ok() {
            changes.push(*observer.borrow_and_update());
        }
        changes
    });

    // Shrinking from 1000px by 20px every 10ms; below 768px from the 12th event on.
    for i in 0..25u32 {
        system.viewport.on_resize(1000 - 20 * i);
        sleep(Duration::from_millis(10)).await;
    }
    // The first window was opened at 1000px, so the layout is still paged.
    assert_eq!(system.viewport.mode(), RenderMode::Paged);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(system.viewport.mode(), RenderMode::Virtualized);

    system.shutdown().await.unwrap();
    assert_eq!(recorder.await.unwrap(), [RenderMode::Virtualized]);
}
