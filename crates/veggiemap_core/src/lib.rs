//! Core client logic for veggiemap.
//! Retrieval with fallback, the filter/sort pipeline and submission live here;
//! rendering is left to front ends.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod state;

pub use api::client::{restaurants_url, ApiError, ApiResult, HttpRestaurantApi, RestaurantApi};
pub use config::{ClientConfig, Endpoints, DEFAULT_API_BASE_URL, FALLBACK_API_BASE_URL};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::restaurant::{
    Cuisine, Location, PriceRange, Rating, Restaurant, RestaurantDraft, RestaurantId,
    RestaurantValidationError,
};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotStore, SqliteSnapshotStore, RESTAURANTS_CACHE_KEY,
};
pub use search::pipeline::{
    filter_and_sort, CuisineFilter, PriceFilter, RestaurantQuery, SortKey, CUISINE_ALL,
    PRICE_ALL,
};
pub use service::retrieval_service::{
    FetchSource, RefreshOutcome, RetrievalService, LOAD_FAILED_MESSAGE,
};
pub use service::submission_service::{
    assign_identity, SubmissionService, SubmitError, SubmitReceipt, SUBMIT_FAILED_MESSAGE,
};
pub use state::{Action, AppState, ViewMode};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
