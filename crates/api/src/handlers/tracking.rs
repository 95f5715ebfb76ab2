//! Handlers for the append-only tracking log.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use parceld_core::tracking;
use parceld_db::models::tracking_event::CreateTrackingEvent;
use parceld_db::repositories::TrackingRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /tracking
// ---------------------------------------------------------------------------

/// Append one tracking event, stamped with the current time. The log is not
/// constrained to known parcels.
pub async fn record(
    State(state): State<AppState>,
    Json(body): Json<CreateTrackingEvent>,
) -> AppResult<impl IntoResponse> {
    tracking::validate_event(&body.tracking_id, &body.status)?;

    let event = TrackingRepo::append(
        &state.pool,
        &body.tracking_id,
        &body.status,
        body.description.as_deref().unwrap_or(""),
    )
    .await?;
    tracing::info!(tracking_id = %event.tracking_id, status = %event.status, "Tracking event recorded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

// ---------------------------------------------------------------------------
// GET /tracking/{trackingId}
// ---------------------------------------------------------------------------

/// Full history for a tracking identifier, oldest first. Unknown identifiers
/// yield an empty history.
pub async fn history(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let events = TrackingRepo::history(&state.pool, &tracking_id).await?;
    Ok(Json(DataResponse { data: events }))
}
