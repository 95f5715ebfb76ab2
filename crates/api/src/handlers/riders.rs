//! Handlers for rider applications, approval, and availability.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use parceld_core::error::CoreError;
use parceld_core::rider::RiderStatus;
use parceld_core::roles::ROLE_RIDER;
use parceld_core::types::DbId;
use parceld_db::models::rider::{CreateRider, UpdateRiderStatus};
use parceld_db::repositories::{RiderRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::DistrictParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /riders
// ---------------------------------------------------------------------------

/// Submit a rider application. Applications always start `pending`.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateRider>,
) -> AppResult<impl IntoResponse> {
    if body.name.trim().is_empty() {
        return Err(CoreError::Validation("Rider name must not be empty".into()).into());
    }
    if body.email.trim().is_empty() {
        return Err(CoreError::Validation("Rider email must not be empty".into()).into());
    }
    if body.district.trim().is_empty() {
        return Err(CoreError::Validation("Rider district must not be empty".into()).into());
    }

    let created = RiderRepo::create(&state.pool, &body).await?;
    tracing::info!(id = created.id, email = %created.email, "Rider application submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /riders/pending
// ---------------------------------------------------------------------------

/// Pending rider applications, newest first.
pub async fn pending(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let items = RiderRepo::list_by_status(&state.pool, RiderStatus::Pending).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /riders/approved
// ---------------------------------------------------------------------------

/// Approved riders, newest first.
pub async fn approved(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let items = RiderRepo::list_by_status(&state.pool, RiderStatus::Approved).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /riders/available
// ---------------------------------------------------------------------------

/// Approved riders in a district. Pure read with no ranking; picking one is
/// the caller's concern.
pub async fn available(
    State(state): State<AppState>,
    Query(params): Query<DistrictParams>,
) -> AppResult<impl IntoResponse> {
    let district = params
        .district
        .ok_or_else(|| AppError::BadRequest("District is required".into()))?;
    let items = RiderRepo::list_available(&state.pool, &district).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// PATCH /riders/{id}/status
// ---------------------------------------------------------------------------

/// Update a rider's approval status. Approval promotes the matching user
/// account to the rider role (a second, non-transactional write).
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateRiderStatus>,
) -> AppResult<impl IntoResponse> {
    let status = RiderStatus::parse(&body.status)?;

    let rider = RiderRepo::set_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Rider",
                key: id.to_string(),
            })
        })?;

    if status == RiderStatus::Approved {
        if let Some(ref email) = body.email {
            if !UserRepo::set_role_by_email(&state.pool, email, ROLE_RIDER).await? {
                tracing::warn!(%email, "Approved rider has no matching user account");
            }
        }
    }

    tracing::info!(rider_id = id, status = %body.status, "Rider status updated");
    Ok(Json(DataResponse { data: rider }))
}
