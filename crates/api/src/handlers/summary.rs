//! Handlers for the status aggregations: read-only projections over current
//! parcel state, recomputed on each request. Statuses with no parcels are
//! absent from the result, not present with a zero count.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use parceld_db::repositories::ParcelRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireRider};
use crate::query::EmailParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /admin/parcel-status-counts
// ---------------------------------------------------------------------------

/// Global parcel counts grouped by delivery status.
pub async fn parcel_status_counts(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let counts = ParcelRepo::count_by_status(&state.pool).await?;
    Ok(Json(DataResponse { data: counts }))
}

// ---------------------------------------------------------------------------
// GET /rider/status-summary
// ---------------------------------------------------------------------------

/// One rider's parcel counts grouped by delivery status.
pub async fn rider_status_summary(
    State(state): State<AppState>,
    _rider: RequireRider,
    Query(params): Query<EmailParams>,
) -> AppResult<impl IntoResponse> {
    let email = params
        .email
        .ok_or_else(|| AppError::BadRequest("Missing rider email".into()))?;
    let counts = ParcelRepo::count_by_status_for_rider(&state.pool, &email).await?;
    Ok(Json(DataResponse { data: counts }))
}
