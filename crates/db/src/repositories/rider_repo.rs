//! Repository for the `riders` table.

use parceld_core::rider::{RiderStatus, WORK_STATUS_IN_DELIVERY};
use parceld_core::types::DbId;
use sqlx::PgPool;

use crate::models::rider::{CreateRider, Rider};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, district, phone, status, work_status, created_at";

/// Provides application, approval, and work-binding operations for riders.
pub struct RiderRepo;

impl RiderRepo {
    /// Insert a new rider application, returning the created row. The
    /// approval status takes its column default (pending).
    pub async fn create(pool: &PgPool, input: &CreateRider) -> Result<Rider, sqlx::Error> {
        let query = format!(
            "INSERT INTO riders (name, email, district, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rider>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.district)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a rider by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM riders WHERE id = $1");
        sqlx::query_as::<_, Rider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List riders in a given approval status, newest application first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: RiderStatus,
    ) -> Result<Vec<Rider>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM riders WHERE status = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Rider>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    /// Approved riders in a district, regardless of work status. Pure read;
    /// first-match selection is the caller's concern.
    pub async fn list_available(pool: &PgPool, district: &str) -> Result<Vec<Rider>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM riders WHERE district = $1 AND status = '{approved}'
             ORDER BY created_at, id",
            approved = RiderStatus::Approved.as_str(),
        );
        sqlx::query_as::<_, Rider>(&query)
            .bind(district)
            .fetch_all(pool)
            .await
    }

    /// Set a rider's approval status, returning the updated row.
    ///
    /// Returns `None` if no rider with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: RiderStatus,
    ) -> Result<Option<Rider>, sqlx::Error> {
        let query = format!(
            "UPDATE riders SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rider>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Acquire a rider for a delivery: compare-and-set on the absence of
    /// `work_status`, restricted to approved riders. At most one concurrent
    /// caller observes `true`, which is what keeps a rider on at most one
    /// active delivery.
    pub async fn acquire_for_delivery(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE riders SET work_status = '{in_delivery}'
             WHERE id = $1 AND status = '{approved}' AND work_status IS NULL",
            in_delivery = WORK_STATUS_IN_DELIVERY,
            approved = RiderStatus::Approved.as_str(),
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Release a rider back to available by clearing `work_status`. The
    /// counterpart to [`Self::acquire_for_delivery`], keyed by email because
    /// that is what the delivery confirmation carries.
    ///
    /// Returns `true` if a rider row matched the email.
    pub async fn release_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE riders SET work_status = NULL WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
