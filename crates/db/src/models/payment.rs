//! Payment history model and DTOs.

use parceld_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One confirmed payment. Append-only; the parcel's `payment_status` field
/// remains the source of truth for "is this parcel paid".
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub parcel_id: DbId,
    pub email: String,
    pub amount: f64,
    pub payment_method: String,
    pub transaction_id: String,
    pub paid_at: Timestamp,
}

/// Body of `POST /payments` -- a confirmation signal from the checkout flow.
/// Field names follow the checkout wire contract.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPayment {
    pub parcel_id: DbId,
    pub email: String,
    pub amount: f64,
    pub payment_method: String,
    pub transaction_id: String,
}
