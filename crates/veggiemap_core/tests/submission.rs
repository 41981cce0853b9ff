mod common;

use common::{draft, endpoints, sample_collection, FakeApi, PRIMARY};
use std::collections::HashSet;
use veggiemap_core::db::open_db_in_memory;
use veggiemap_core::{
    Action, AppState, Cuisine, FetchSource, PriceRange, RestaurantQuery, RetrievalService,
    SnapshotStore, SqliteSnapshotStore, SubmissionService, SubmitError, SUBMIT_FAILED_MESSAGE,
};

fn frozen_clock() -> i64 {
    1_000
}

#[tokio::test]
async fn submitted_record_appears_after_refresh() {
    let conn = open_db_in_memory().unwrap();
    let api = FakeApi::new().with_server(PRIMARY, Vec::new());
    let retrieval = RetrievalService::new(api, SqliteSnapshotStore::new(&conn), endpoints());
    let submission = SubmissionService::new(&retrieval);
    let mut state = AppState::new();
    retrieval.refresh(&mut state).await;

    let receipt = submission
        .submit(draft("A", Cuisine::Other, PriceRange::Budget, 5), &mut state)
        .await
        .unwrap();

    assert_eq!(receipt.refresh.source(), Some(FetchSource::Primary));
    assert!(!receipt.restaurant.id.is_empty());
    assert!(receipt.restaurant.timestamp > 0);
    assert_eq!(state.restaurants(), &[receipt.restaurant.clone()]);

    let query = RestaurantQuery::from_controls("", "All", "all", "rating");
    let visible = veggiemap_core::filter_and_sort(state.restaurants(), &query);
    assert_eq!(visible, vec![&receipt.restaurant]);
}

#[tokio::test]
async fn refresh_after_submit_rewrites_cache() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSnapshotStore::new(&conn);
    let api = FakeApi::new().with_server(PRIMARY, sample_collection());
    let retrieval = RetrievalService::new(api, &store, endpoints());
    let submission = SubmissionService::new(&retrieval);
    let mut state = AppState::new();

    let receipt = submission
        .submit(draft("Cache Me", Cuisine::Thai, PriceRange::Moderate, 4), &mut state)
        .await
        .unwrap();

    let cached = store.read_snapshot().unwrap().unwrap();
    assert_eq!(cached.len(), 7);
    assert_eq!(cached.last(), Some(&receipt.restaurant));
}

#[tokio::test]
async fn failed_post_sets_message_and_leaves_collection() {
    let conn = open_db_in_memory().unwrap();
    let api = FakeApi::new()
        .with_server(PRIMARY, sample_collection())
        .rejecting_posts();
    let retrieval = RetrievalService::new(api, SqliteSnapshotStore::new(&conn), endpoints());
    let submission = SubmissionService::new(&retrieval);
    let mut state = AppState::new();
    retrieval.refresh(&mut state).await;

    let err = submission
        .submit(draft("Nope", Cuisine::Other, PriceRange::Budget, 1), &mut state)
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Api(_)));
    assert_eq!(state.error(), Some(SUBMIT_FAILED_MESSAGE));
    assert_eq!(state.restaurants(), sample_collection().as_slice());
    assert!(retrieval.api().posted().is_empty());
}

#[tokio::test]
async fn submission_error_replaces_retrieval_error_and_success_clears_it() {
    let conn = open_db_in_memory().unwrap();
    let api = FakeApi::new().with_server(PRIMARY, Vec::new());
    let retrieval = RetrievalService::new(api, SqliteSnapshotStore::new(&conn), endpoints());
    let submission = SubmissionService::new(&retrieval);
    let mut state = AppState::new().reduce(Action::Failed("earlier".to_string()));

    let blank = veggiemap_core::RestaurantDraft {
        name: String::new(),
        ..draft("x", Cuisine::Other, PriceRange::Budget, 3)
    };
    let err = submission.submit(blank, &mut state).await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation(_)));
    assert_ne!(state.error(), Some("earlier"));
    assert!(retrieval.api().posted().is_empty());

    submission
        .submit(draft("Fine", Cuisine::Other, PriceRange::Budget, 3), &mut state)
        .await
        .unwrap();
    assert_eq!(state.error(), None);
}

#[tokio::test]
async fn sequential_submissions_get_unique_ids_and_monotonic_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let api = FakeApi::new().with_server(PRIMARY, sample_collection());
    let retrieval = RetrievalService::new(api, SqliteSnapshotStore::new(&conn), endpoints());
    let submission = SubmissionService::with_clock(&retrieval, frozen_clock);
    let mut state = AppState::new();
    retrieval.refresh(&mut state).await;

    let mut last_timestamp = i64::MIN;
    for name in ["One", "Two", "Three"] {
        let receipt = submission
            .submit(draft(name, Cuisine::Indian, PriceRange::Budget, 4), &mut state)
            .await
            .unwrap();
        // Clock is frozen below the newest sample record (5_000).
        assert!(receipt.restaurant.timestamp >= 5_000);
        assert!(receipt.restaurant.timestamp >= last_timestamp);
        last_timestamp = receipt.restaurant.timestamp;
    }

    let ids = state
        .restaurants()
        .iter()
        .map(|r| r.id.as_str())
        .collect::<HashSet<_>>();
    assert_eq!(ids.len(), state.restaurants().len());
    assert_eq!(ids.len(), 9);
}
