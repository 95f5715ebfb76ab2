//! Tracking log model and DTOs.

use parceld_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One append-only tracking log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrackingEvent {
    pub id: DbId,
    pub tracking_id: String,
    pub status: String,
    pub description: String,
    pub recorded_at: Timestamp,
}

/// Body of `POST /tracking`. Field names follow the tracking wire contract.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrackingEvent {
    pub tracking_id: String,
    pub status: String,
    pub description: Option<String>,
}
