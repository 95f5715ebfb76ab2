//! Route definitions for the tracking log.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tracking;
use crate::state::AppState;

/// Routes mounted at `/tracking`.
///
/// ```text
/// POST /                -> append event
/// GET  /{trackingId}    -> full history, oldest first
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(tracking::record))
        .route("/{tracking_id}", get(tracking::history))
}
