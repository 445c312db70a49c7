use std::sync::Arc;

use dexview_core::{CatalogueConfig, CatalogueStore, ItemDetail, ItemId, Session, StatBlock};
use dexview_fetch::{
    BatchFetcher, FetchError, LoadOutcome, MemorySource, PageState, PaginationController,
};

fn generation(count: u32) -> Vec<ItemDetail> {
    (1..=count)
        .map(|n| ItemDetail {
            id: ItemId::new(format!("mon-{n:03}")),
            number: n,
            image: None,
            types: vec!["normal".to_string()],
            stats: StatBlock::default(),
            height: n,
            weight: n * 10,
            base_experience: None,
            abilities: Vec::new(),
        })
        .collect()
}

fn setup(items: u32, config: &CatalogueConfig) -> (Arc<MemorySource>, BatchFetcher<MemorySource>, PaginationController) {
    let source = Arc::new(MemorySource::new(generation(items)));
    let fetcher = BatchFetcher::new(Arc::clone(&source));
    (source, fetcher, PaginationController::new(config))
}

#[tokio::test]
async fn test_loads_up_to_bound_then_exhausts() {
    let config = CatalogueConfig::default();
    let (_source, fetcher, mut pager) = setup(300, &config);
    let mut store = CatalogueStore::new();

    let mut sizes = Vec::new();
    while !pager.is_exhausted() {
        match pager.load_next(&fetcher, &mut store).await.unwrap() {
            LoadOutcome::Loaded { added, .. } => sizes.push(added),
            LoadOutcome::Exhausted => break,
        }
    }

    assert_eq!(sizes, [20, 20, 20, 20, 20, 20, 20, 11]);
    assert_eq!(pager.state(), PageState::Exhausted);
    assert_eq!(store.len(), 151);

    let outcome = pager.load_next(&fetcher, &mut store).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Exhausted);
    assert_eq!(pager.loaded(), 151);
    assert_eq!(store.len(), 151);
}

#[tokio::test]
async fn test_catalogue_order_follows_request_order() {
    let config = CatalogueConfig::builder().page_size(3usize).max_items(7usize).build().unwrap();
    let (_source, fetcher, mut pager) = setup(10, &config);
    let mut store = CatalogueStore::new();

    for _ in 0..3 {
        pager.load_next(&fetcher, &mut store).await.unwrap();
    }

    let numbers: Vec<u32> = store.iter().map(|d| d.number).collect();
    assert_eq!(numbers, [1, 2, 3, 4, 5, 6, 7]);
    assert!(pager.is_exhausted());
}

#[tokio::test]
async fn test_failure_leaves_state_unchanged() {
    let config = CatalogueConfig::default();
    let (source, fetcher, mut pager) = setup(151, &config);
    let mut store = CatalogueStore::new();

    pager.load_next(&fetcher, &mut store).await.unwrap();
    let before: Vec<ItemId> = store.order().to_vec();

    source.fail_on("mon-025");
    let err = pager.load_next(&fetcher, &mut store).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { .. }));
    assert_eq!(pager.loaded(), 20);
    assert_eq!(pager.state(), PageState::Idle);
    assert_eq!(store.order(), before.as_slice());

    source.fail_listing();
    let err = pager.load_next(&fetcher, &mut store).await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));
    assert_eq!(pager.loaded(), 20);

    source.heal();
    let outcome = pager.load_next(&fetcher, &mut store).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded { added: 20, loaded: 40 });
    assert_eq!(store.order()[20].as_str(), "mon-021");
}

#[tokio::test]
async fn test_short_source_exhausts_early() {
    let config = CatalogueConfig::default();
    let (_source, fetcher, mut pager) = setup(25, &config);
    let mut store = CatalogueStore::new();

    pager.load_next(&fetcher, &mut store).await.unwrap();
    let outcome = pager.load_next(&fetcher, &mut store).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded { added: 5, loaded: 25 });
    assert!(pager.is_exhausted());
}

#[tokio::test]
async fn test_background_fetch_commits_into_session() {
    let config = CatalogueConfig::default();
    let (_source, fetcher, mut pager) = setup(151, &config);
    let mut session = Session::new(config);
    session.search("mon-01");

    let request = pager.begin().unwrap().unwrap();
    assert!(matches!(pager.begin(), Err(FetchError::InFlight)));

    let task_fetcher = fetcher.clone();
    let result = tokio::spawn(async move { task_fetcher.fetch(request).await })
        .await
        .unwrap();
    pager.finish(request, result, &mut session).unwrap();

    assert_eq!(session.store().len(), 20);
    // mon-010 .. mon-019
    assert_eq!(session.filter().matches().len(), 10);
    assert!(!pager.is_loading());
}
