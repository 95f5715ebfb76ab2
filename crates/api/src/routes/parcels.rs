//! Route definitions for the parcel lifecycle.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::parcels;
use crate::state::AppState;

/// Routes mounted at `/parcels`.
///
/// ```text
/// GET    /              -> filtered list, newest first
/// POST   /              -> create
/// GET    /{id}          -> get
/// DELETE /{id}          -> hard delete
/// PATCH  /{id}/assign   -> bind rider
/// PATCH  /{id}/status   -> advance delivery status
/// PATCH  /{id}/cashout  -> request cash-out (at most once)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parcels::list).post(parcels::create))
        .route("/{id}", get(parcels::get_parcel).delete(parcels::delete_parcel))
        .route("/{id}/assign", patch(parcels::assign_rider))
        .route("/{id}/status", patch(parcels::advance_status))
        .route("/{id}/cashout", patch(parcels::cash_out))
}
