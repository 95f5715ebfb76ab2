//! Rider entity model and DTOs.

use parceld_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full rider row from the `riders` table.
///
/// `work_status` is `None` while the rider is available and `"in-delivery"`
/// while bound to a parcel.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rider {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub district: String,
    pub phone: Option<String>,
    pub status: String,
    pub work_status: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for a rider application. Applications always start `pending`.
#[derive(Debug, Deserialize)]
pub struct CreateRider {
    pub name: String,
    pub email: String,
    pub district: String,
    pub phone: Option<String>,
}

/// Body of `PATCH /riders/{id}/status`. `email` identifies the user account
/// to promote to the rider role when the new status is `approved`.
#[derive(Debug, Deserialize)]
pub struct UpdateRiderStatus {
    pub status: String,
    pub email: Option<String>,
}
