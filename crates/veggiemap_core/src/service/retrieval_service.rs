//! Retrieval use-case: fetch with fallback chain and cache mirroring.
//!
//! # Invariants
//! - Sources are tried in order `Primary`, `Fallback`, `Cache` and the
//!   first success wins.
//! - If every source fails, the collection is left untouched and the error
//!   slot holds [`LOAD_FAILED_MESSAGE`].
//! - A cache hit clears the error even though both network steps failed.

use crate::api::client::{ApiError, RestaurantApi};
use crate::config::Endpoints;
use crate::model::restaurant::Restaurant;
use crate::repo::snapshot_repo::SnapshotStore;
use crate::state::{Action, AppState};
use log::{info, warn};
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load restaurants. Please try again later.";

/// Where a refreshed collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Primary,
    Fallback,
    Cache,
}

impl FetchSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            Self::Cache => "cache",
        }
    }
}

impl Display for FetchSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Collection replaced from `source`.
    Updated { source: FetchSource, count: usize },
    /// No source produced data; state keeps its previous collection.
    Unavailable,
}

impl RefreshOutcome {
    pub fn source(self) -> Option<FetchSource> {
        match self {
            Self::Updated { source, .. } => Some(source),
            Self::Unavailable => None,
        }
    }
}

/// Retrieval service over an API transport and a snapshot store.
pub struct RetrievalService<A, S> {
    api: A,
    store: S,
    endpoints: Endpoints,
}

impl<A: RestaurantApi, S: SnapshotStore> RetrievalService<A, S> {
    pub fn new(api: A, store: S, endpoints: Endpoints) -> Self {
        Self {
            api,
            store,
            endpoints,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Runs the network steps of the chain.
    ///
    /// Returns every step's error, in order, when no endpoint succeeds.
    pub async fn fetch_remote(&self) -> Result<(FetchSource, Vec<Restaurant>), Vec<ApiError>> {
        let steps = [
            (FetchSource::Primary, self.endpoints.primary.as_str()),
            (FetchSource::Fallback, self.endpoints.fallback.as_str()),
        ];
        let mut failures = Vec::with_capacity(steps.len());

        for (source, base_url) in steps {
            match self.api.fetch_restaurants(base_url).await {
                Ok(restaurants) => return Ok((source, restaurants)),
                Err(err) => {
                    warn!(
                        "event=refresh_step module=service status=error source={} error_code={} error={}",
                        source,
                        err.code(),
                        err
                    );
                    failures.push(err);
                }
            }
        }

        Err(failures)
    }

    /// Reads the cached collection; unreadable snapshots count as absent.
    pub fn read_cache(&self) -> Option<Vec<Restaurant>> {
        match self.store.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    "event=cache_recover module=service status=error error_code=cache_unreadable error={}",
                    err
                );
                None
            }
        }
    }

    /// Refreshes `state` from the first source that answers.
    ///
    /// # Side effects
    /// - Replaces the collection and clears the error on success.
    /// - Rewrites the cache whenever the collection was replaced.
    pub async fn refresh(&self, state: &mut AppState) -> RefreshOutcome {
        let started_at = Instant::now();
        info!("event=refresh module=service status=start");
        state.dispatch(Action::LoadStarted);

        let (source, restaurants) = match self.fetch_remote().await {
            Ok(found) => found,
            Err(_) => {
                state.dispatch(Action::Failed(LOAD_FAILED_MESSAGE.to_string()));
                match self.read_cache() {
                    Some(cached) => (FetchSource::Cache, cached),
                    None => {
                        warn!(
                            "event=refresh module=service status=error duration_ms={} error_code=all_sources_failed",
                            started_at.elapsed().as_millis()
                        );
                        return RefreshOutcome::Unavailable;
                    }
                }
            }
        };

        let count = restaurants.len();
        state.dispatch(Action::Loaded(restaurants));
        self.persist(state.restaurants());

        info!(
            "event=refresh module=service status=ok source={} count={} duration_ms={}",
            source,
            count,
            started_at.elapsed().as_millis()
        );
        RefreshOutcome::Updated { source, count }
    }

    /// Mirrors the collection into the cache; failures are only logged.
    pub fn persist(&self, restaurants: &[Restaurant]) {
        if let Err(err) = self.store.write_snapshot(restaurants) {
            warn!(
                "event=cache_persist module=service status=error error_code=cache_write_failed error={}",
                err
            );
        }
    }
}
