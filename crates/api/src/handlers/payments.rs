//! Handlers for payment-intent creation and payment confirmation.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use parceld_core::error::CoreError;
use parceld_db::models::payment::ConfirmPayment;
use parceld_db::repositories::{ParcelRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::EmailParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /create-payment-intent
// ---------------------------------------------------------------------------

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    pub amount_in_cents: i64,
}

/// Client-facing view of a created charge intent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

/// Delegate charge-intent creation to the external payment provider.
pub async fn create_intent(
    State(state): State<AppState>,
    Json(body): Json<CreateIntentRequest>,
) -> AppResult<impl IntoResponse> {
    if body.amount_in_cents <= 0 {
        return Err(CoreError::Validation("amountInCents must be positive".into()).into());
    }

    let intent = state.payments.create_intent(body.amount_in_cents).await?;
    Ok(Json(DataResponse {
        data: CreateIntentResponse {
            client_secret: intent.client_secret,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /payments
// ---------------------------------------------------------------------------

/// Confirm a payment for a parcel.
///
/// Marks the parcel paid behind an unpaid-only guard, then appends one
/// payment record. A replayed confirmation trips the guard and appends
/// nothing; the payment append is the second, non-transactional step and is
/// not rolled back into the parcel update on failure.
pub async fn confirm(
    State(state): State<AppState>,
    Json(body): Json<ConfirmPayment>,
) -> AppResult<impl IntoResponse> {
    if body.transaction_id.trim().is_empty() {
        return Err(CoreError::Validation("Missing transactionId".into()).into());
    }
    if body.email.trim().is_empty() {
        return Err(CoreError::Validation("Missing payer email".into()).into());
    }
    if body.amount <= 0.0 {
        return Err(CoreError::Validation("Payment amount must be positive".into()).into());
    }

    if !ParcelRepo::mark_paid(&state.pool, body.parcel_id, &body.transaction_id).await? {
        return Err(
            match ParcelRepo::find_by_id(&state.pool, body.parcel_id).await? {
                None => CoreError::NotFound {
                    entity: "Parcel",
                    key: body.parcel_id.to_string(),
                }
                .into(),
                Some(_) => CoreError::AlreadyDone("Parcel is already paid".into()).into(),
            },
        );
    }

    let payment = PaymentRepo::create(&state.pool, &body).await?;
    tracing::info!(
        parcel_id = body.parcel_id,
        transaction_id = %body.transaction_id,
        "Payment confirmed"
    );
    Ok(Json(DataResponse { data: payment }))
}

// ---------------------------------------------------------------------------
// GET /payments
// ---------------------------------------------------------------------------

/// Payment history, newest first. Admin-only, and scoped to the calling
/// account's email.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<EmailParams>,
) -> AppResult<impl IntoResponse> {
    let email = params
        .email
        .ok_or_else(|| AppError::BadRequest("Missing email query".into()))?;
    if admin.email != email {
        return Err(CoreError::Forbidden(
            "Payments may only be listed for the calling account".into(),
        )
        .into());
    }

    let items = PaymentRepo::list_by_email(&state.pool, &email).await?;
    Ok(Json(DataResponse { data: items }))
}
