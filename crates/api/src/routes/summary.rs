//! Route definitions for admin-facing aggregations.

use axum::routing::get;
use axum::Router;

use crate::handlers::summary;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /parcel-status-counts -> global counts by delivery status
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/parcel-status-counts", get(summary::parcel_status_counts))
}
