//! Parcel entity model and DTOs.

use parceld_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full parcel row from the `parcels` table.
///
/// `cash_out_status` is `None` until a cash-out is requested; `work` fields
/// (`assigned_rider_*`, stage timestamps) are `None` until the corresponding
/// lifecycle transition stamps them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Parcel {
    pub id: DbId,
    pub title: String,
    pub tracking_id: Option<String>,
    pub email: String,
    pub sender_district: Option<String>,
    pub receiver_district: Option<String>,
    pub weight_kg: Option<f64>,
    pub cost: f64,
    pub payment_status: String,
    pub delivery_status: String,
    pub cash_out_status: Option<String>,
    pub transaction_id: Option<String>,
    pub assigned_rider_id: Option<DbId>,
    pub assigned_rider_email: Option<String>,
    pub created_at: Timestamp,
    pub paid_at: Option<Timestamp>,
    pub assigned_at: Option<Timestamp>,
    pub in_transit_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub cashed_out_at: Option<Timestamp>,
}

/// DTO for creating a new parcel. New parcels always start unpaid/pending;
/// payment and delivery state are never writable at creation.
#[derive(Debug, Deserialize)]
pub struct CreateParcel {
    pub title: String,
    pub tracking_id: Option<String>,
    pub email: String,
    pub sender_district: Option<String>,
    pub receiver_district: Option<String>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub cost: f64,
}

/// Conjunctive equality filter for parcel listings.
///
/// `None` means "no constraint on that field", not "match absent".
#[derive(Debug, Default)]
pub struct ParcelFilter {
    pub payment_status: Option<String>,
    pub delivery_status: Option<String>,
    pub email: Option<String>,
}

/// One row of a count-by-delivery-status aggregation. Statuses with no
/// current parcels do not appear.
#[derive(Debug, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
