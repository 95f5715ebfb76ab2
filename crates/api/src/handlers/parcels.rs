//! Handlers for the parcel lifecycle: creation, listing, rider assignment,
//! delivery progression, and cash-out.
//!
//! Validation happens before any write. Lifecycle writes go through the
//! conditional updates in `ParcelRepo`/`RiderRepo`; a zero-row outcome is
//! disambiguated here into `NotFound`, `Conflict`, or `AlreadyDone`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use parceld_core::error::CoreError;
use parceld_core::rider::RiderStatus;
use parceld_core::status::{AdvanceTarget, DeliveryStatus, PaymentStatus};
use parceld_core::types::DbId;
use parceld_db::models::parcel::{CreateParcel, Parcel, ParcelFilter};
use parceld_db::repositories::{ParcelRepo, RiderRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireRider;
use crate::query::{EmailParams, ParcelListParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `PATCH /parcels/{id}/assign`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRiderRequest {
    pub rider_id: DbId,
}

/// Body of `PATCH /parcels/{id}/status`. `rider_email` releases the rider
/// back to available when the new status is `delivered`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceStatusRequest {
    pub status: String,
    pub rider_email: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a parcel exists, returning the full row.
async fn ensure_parcel_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Parcel> {
    ParcelRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Parcel",
            key: id.to_string(),
        })
    })
}

/// Parse the stored delivery-status label. A label outside the domain means
/// the row was corrupted outside the lifecycle engine.
fn current_delivery_status(parcel: &Parcel) -> AppResult<DeliveryStatus> {
    DeliveryStatus::parse(&parcel.delivery_status).map_err(|_| {
        AppError::InternalError(format!(
            "Parcel {} carries an invalid delivery status '{}'",
            parcel.id, parcel.delivery_status
        ))
    })
}

// ---------------------------------------------------------------------------
// GET /parcels
// ---------------------------------------------------------------------------

/// List parcels matching the optional filters, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ParcelListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref label) = params.payment_status {
        PaymentStatus::parse(label)?;
    }
    if let Some(ref label) = params.delivery_status {
        DeliveryStatus::parse(label)?;
    }

    let filter = ParcelFilter {
        payment_status: params.payment_status,
        delivery_status: params.delivery_status,
        email: params.email,
    };
    let items = ParcelRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = items.len(), "Listed parcels");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /parcels
// ---------------------------------------------------------------------------

/// Create a new parcel. Always starts unpaid and pending.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateParcel>,
) -> AppResult<impl IntoResponse> {
    if body.title.trim().is_empty() {
        return Err(CoreError::Validation("Parcel title must not be empty".into()).into());
    }
    if body.email.trim().is_empty() {
        return Err(CoreError::Validation("Owner email must not be empty".into()).into());
    }

    let created = ParcelRepo::create(&state.pool, &body).await?;
    tracing::info!(id = created.id, email = %created.email, "Parcel created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /parcels/{id}
// ---------------------------------------------------------------------------

/// Get a single parcel by ID.
pub async fn get_parcel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let parcel = ensure_parcel_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: parcel }))
}

// ---------------------------------------------------------------------------
// DELETE /parcels/{id}
// ---------------------------------------------------------------------------

/// Remove a parcel. Terminal: hard delete, no soft-delete.
pub async fn delete_parcel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ParcelRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Parcel",
            key: id.to_string(),
        }
        .into());
    }
    tracing::info!(id, "Parcel deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// PATCH /parcels/{id}/assign
// ---------------------------------------------------------------------------

/// Bind a rider to a pending parcel.
///
/// Acquires the rider first (compare-and-set on `work_status` absence) so
/// two concurrent assigns cannot share a rider, then binds the parcel. The
/// two writes are not transactional; on a bind failure the acquire stands.
pub async fn assign_rider(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<AssignRiderRequest>,
) -> AppResult<impl IntoResponse> {
    let rider = RiderRepo::find_by_id(&state.pool, body.rider_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Rider",
                key: body.rider_id.to_string(),
            })
        })?;

    if rider.status != RiderStatus::Approved.as_str() {
        return Err(CoreError::Conflict("Rider is not approved for deliveries".into()).into());
    }

    if !RiderRepo::acquire_for_delivery(&state.pool, rider.id).await? {
        return Err(CoreError::Conflict("Rider is already on a delivery".into()).into());
    }

    if !ParcelRepo::bind_rider(&state.pool, id, rider.id, &rider.email).await? {
        return Err(match ParcelRepo::find_by_id(&state.pool, id).await? {
            None => CoreError::NotFound {
                entity: "Parcel",
                key: id.to_string(),
            }
            .into(),
            Some(p) => CoreError::Conflict(format!(
                "Parcel is not awaiting assignment (delivery status '{}')",
                p.delivery_status
            ))
            .into(),
        });
    }

    tracing::info!(parcel_id = id, rider_id = rider.id, "Rider assigned to parcel");
    let updated = ensure_parcel_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PATCH /parcels/{id}/status
// ---------------------------------------------------------------------------

/// Advance the delivery status to `in-transit` or `delivered`.
///
/// The transition is validated against the current status and applied with
/// a conditional update requiring the expected predecessor, so a concurrent
/// transition cannot be overwritten. Delivering with a rider email releases
/// that rider back to available.
pub async fn advance_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<AdvanceStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let target = AdvanceTarget::parse(&body.status)?;
    let parcel = ensure_parcel_exists(&state.pool, id).await?;
    let current = current_delivery_status(&parcel)?;
    target.validate_from(current)?;

    let advanced = match target {
        AdvanceTarget::InTransit => ParcelRepo::mark_in_transit(&state.pool, id).await?,
        AdvanceTarget::Delivered => ParcelRepo::mark_delivered(&state.pool, id).await?,
    };
    if !advanced {
        return Err(CoreError::Conflict(format!(
            "Delivery status changed concurrently; expected '{current}'"
        ))
        .into());
    }

    if target == AdvanceTarget::Delivered {
        if let Some(ref rider_email) = body.rider_email {
            // Counterpart release to the assignment acquire.
            if !RiderRepo::release_by_email(&state.pool, rider_email).await? {
                tracing::warn!(%rider_email, "Delivered parcel referenced an unknown rider email");
            }
        }
    }

    tracing::info!(parcel_id = id, status = %body.status, "Delivery status advanced");
    let updated = ensure_parcel_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PATCH /parcels/{id}/cashout
// ---------------------------------------------------------------------------

/// Request cash-out for a delivered parcel. At most once: the guard is a
/// compare-and-set on the absence of `cash_out_status`.
pub async fn cash_out(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let parcel = ensure_parcel_exists(&state.pool, id).await?;
    let current = current_delivery_status(&parcel)?;

    if ParcelRepo::cash_out(&state.pool, id).await? {
        tracing::info!(parcel_id = id, "Cash-out requested");
        let updated = ensure_parcel_exists(&state.pool, id).await?;
        return Ok(Json(DataResponse { data: updated }));
    }

    // Zero rows with the parcel present: either it is not yet delivered or
    // the guard already tripped once.
    if !current.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "Parcel cannot be cashed out while '{current}'"
        ))
        .into());
    }
    Err(CoreError::AlreadyDone("Cash-out already requested for this parcel".into()).into())
}

// ---------------------------------------------------------------------------
// GET /rider/parcels
// ---------------------------------------------------------------------------

/// Parcels currently on a rider's route (assigned or in transit).
pub async fn rider_active(
    State(state): State<AppState>,
    _rider: RequireRider,
    Query(params): Query<EmailParams>,
) -> AppResult<impl IntoResponse> {
    let email = params
        .email
        .ok_or_else(|| AppError::BadRequest("Missing rider email".into()))?;
    let items = ParcelRepo::list_active_for_rider(&state.pool, &email).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /rider/completed-parcels
// ---------------------------------------------------------------------------

/// Parcels a rider has completed, most recent assignment first.
pub async fn rider_completed(
    State(state): State<AppState>,
    _rider: RequireRider,
    Query(params): Query<EmailParams>,
) -> AppResult<impl IntoResponse> {
    let email = params
        .email
        .ok_or_else(|| AppError::BadRequest("Missing rider email".into()))?;
    let items = ParcelRepo::list_completed_for_rider(&state.pool, &email).await?;
    Ok(Json(DataResponse { data: items }))
}
