//! Repository for the `tracking_events` table. Append-only: no update or
//! delete operations exist on this log.

use sqlx::PgPool;

use crate::models::tracking_event::TrackingEvent;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tracking_id, status, description, recorded_at";

/// Provides append and history operations for the tracking log.
pub struct TrackingRepo;

impl TrackingRepo {
    /// Append one event, stamped with the current time.
    pub async fn append(
        pool: &PgPool,
        tracking_id: &str,
        status: &str,
        description: &str,
    ) -> Result<TrackingEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracking_events (tracking_id, status, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrackingEvent>(&query)
            .bind(tracking_id)
            .bind(status)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// Full event history for a tracking identifier, oldest first. Unknown
    /// identifiers yield an empty history, not an error.
    pub async fn history(
        pool: &PgPool,
        tracking_id: &str,
    ) -> Result<Vec<TrackingEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracking_events WHERE tracking_id = $1
             ORDER BY recorded_at, id"
        );
        sqlx::query_as::<_, TrackingEvent>(&query)
            .bind(tracking_id)
            .fetch_all(pool)
            .await
    }
}
