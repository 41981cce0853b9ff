//! Submission use-case: complete a draft, post it, resynchronize.
//!
//! # Invariants
//! - `id` and `timestamp` are assigned here and nowhere else.
//! - Issued ids never collide with ids already in the collection.
//! - Issued timestamps never go below the newest known record or the
//!   previous submission from this service.
//! - No optimistic insertion: the record becomes visible only through the
//!   refresh that follows a successful POST.

use crate::api::client::{ApiError, RestaurantApi};
use crate::model::restaurant::{Restaurant, RestaurantDraft, RestaurantValidationError};
use crate::repo::snapshot_repo::SnapshotStore;
use crate::service::retrieval_service::{RefreshOutcome, RetrievalService};
use crate::state::{Action, AppState};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to add restaurant. Please try again.";

/// Submission failure.
#[derive(Debug)]
pub enum SubmitError {
    /// Draft rejected before any request was made.
    Validation(RestaurantValidationError),
    /// POST failed; the draft is discarded.
    Api(ApiError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid restaurant draft: {err}"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Api(err) => Some(err),
        }
    }
}

impl From<RestaurantValidationError> for SubmitError {
    fn from(value: RestaurantValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ApiError> for SubmitError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    /// Record as posted, with assigned identity.
    pub restaurant: Restaurant,
    /// Outcome of the follow-up refresh.
    pub refresh: RefreshOutcome,
}

/// Current wall clock in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Completes `draft` with a fresh id and a timestamp of at least `now_ms`
/// and at least the newest timestamp in `existing`.
pub fn assign_identity(draft: RestaurantDraft, existing: &[Restaurant], now_ms: i64) -> Restaurant {
    let mut id = Uuid::new_v4().to_string();
    while existing.iter().any(|restaurant| restaurant.id == id) {
        id = Uuid::new_v4().to_string();
    }

    let newest = existing
        .iter()
        .map(|restaurant| restaurant.timestamp)
        .max()
        .unwrap_or(now_ms);

    Restaurant::from_draft(draft, id, now_ms.max(newest))
}

/// Submission service borrowing the retrieval service it resynchronizes.
pub struct SubmissionService<'r, A, S> {
    retrieval: &'r RetrievalService<A, S>,
    clock: fn() -> i64,
    last_issued_ms: AtomicI64,
}

impl<'r, A: RestaurantApi, S: SnapshotStore> SubmissionService<'r, A, S> {
    pub fn new(retrieval: &'r RetrievalService<A, S>) -> Self {
        Self::with_clock(retrieval, now_epoch_ms)
    }

    /// Uses `clock` instead of the system time, for deterministic callers.
    pub fn with_clock(retrieval: &'r RetrievalService<A, S>, clock: fn() -> i64) -> Self {
        Self {
            retrieval,
            clock,
            last_issued_ms: AtomicI64::new(i64::MIN),
        }
    }

    /// Submits one draft and refreshes `state` on success.
    ///
    /// # Errors
    /// - `Validation` when the draft fails `RestaurantDraft::validate`; the
    ///   error slot gets the validation message.
    /// - `Api` when the POST fails; the error slot gets
    ///   [`SUBMIT_FAILED_MESSAGE`] and the collection is unchanged.
    pub async fn submit(
        &self,
        draft: RestaurantDraft,
        state: &mut AppState,
    ) -> Result<SubmitReceipt, SubmitError> {
        if let Err(err) = draft.validate() {
            warn!(
                "event=submit module=service status=error error_code=invalid_draft error={}",
                err
            );
            state.dispatch(Action::Failed(err.to_string()));
            return Err(err.into());
        }

        let restaurant = self.complete(draft, state.restaurants());
        let base_url = self.retrieval.endpoints().primary.as_str();
        info!(
            "event=submit module=service status=start restaurant_id={}",
            restaurant.id
        );

        if let Err(err) = self
            .retrieval
            .api()
            .create_restaurant(base_url, &restaurant)
            .await
        {
            warn!(
                "event=submit module=service status=error restaurant_id={} error_code={} error={}",
                restaurant.id,
                err.code(),
                err
            );
            state.dispatch(Action::Failed(SUBMIT_FAILED_MESSAGE.to_string()));
            return Err(err.into());
        }

        let refresh = self.retrieval.refresh(state).await;
        info!(
            "event=submit module=service status=ok restaurant_id={} refreshed_from={}",
            restaurant.id,
            refresh.source().map_or("none", |source| source.as_str())
        );

        Ok(SubmitReceipt {
            restaurant,
            refresh,
        })
    }

    fn complete(&self, draft: RestaurantDraft, existing: &[Restaurant]) -> Restaurant {
        let floor = self.last_issued_ms.load(Ordering::Relaxed);
        let restaurant = assign_identity(draft, existing, (self.clock)().max(floor));
        self.last_issued_ms
            .fetch_max(restaurant.timestamp, Ordering::Relaxed);
        restaurant
    }
}
