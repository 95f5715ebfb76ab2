//! Route definitions for riders: the application/approval surface under
//! `/riders` and the rider-facing work views under `/rider`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{parcels, riders, summary};
use crate::state::AppState;

/// Routes mounted at `/riders`.
///
/// ```text
/// POST  /              -> apply
/// GET   /pending       -> pending applications (admin)
/// GET   /approved      -> approved riders (admin)
/// GET   /available     -> approved riders by district
/// PATCH /{id}/status   -> approval update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(riders::create))
        .route("/pending", get(riders::pending))
        .route("/approved", get(riders::approved))
        .route("/available", get(riders::available))
        .route("/{id}/status", patch(riders::update_status))
}

/// Routes mounted at `/rider` (rider-role work views).
///
/// ```text
/// GET /parcels            -> active parcels (assigned, in-transit)
/// GET /completed-parcels  -> completed parcels
/// GET /status-summary     -> per-rider status counts
/// ```
pub fn rider_view_router() -> Router<AppState> {
    Router::new()
        .route("/parcels", get(parcels::rider_active))
        .route("/completed-parcels", get(parcels::rider_completed))
        .route("/status-summary", get(summary::rider_status_summary))
}
