//! Repository for the `parcels` table.
//!
//! All lifecycle mutations are single-statement conditional updates: the
//! `WHERE` clause carries the guard (expected predecessor status, unpaid,
//! cash-out absent) and a `false` return means the guard did not match --
//! either the row is missing or another request got there first.

use parceld_core::status::{DeliveryStatus, PaymentStatus, CASHED_OUT};
use parceld_core::types::DbId;
use sqlx::PgPool;

use crate::models::parcel::{CreateParcel, Parcel, ParcelFilter, StatusCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, tracking_id, email, sender_district, receiver_district, \
                       weight_kg, cost, payment_status, delivery_status, cash_out_status, \
                       transaction_id, assigned_rider_id, assigned_rider_email, created_at, \
                       paid_at, assigned_at, in_transit_at, delivered_at, cashed_out_at";

/// Provides lifecycle and query operations for parcels.
pub struct ParcelRepo;

impl ParcelRepo {
    /// Insert a new parcel, returning the created row. Payment and delivery
    /// state take their column defaults (unpaid, pending).
    pub async fn create(pool: &PgPool, input: &CreateParcel) -> Result<Parcel, sqlx::Error> {
        let query = format!(
            "INSERT INTO parcels (title, tracking_id, email, sender_district, \
                                  receiver_district, weight_kg, cost)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parcel>(&query)
            .bind(&input.title)
            .bind(&input.tracking_id)
            .bind(&input.email)
            .bind(&input.sender_district)
            .bind(&input.receiver_district)
            .bind(input.weight_kg)
            .bind(input.cost)
            .fetch_one(pool)
            .await
    }

    /// Find a parcel by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Parcel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parcels WHERE id = $1");
        sqlx::query_as::<_, Parcel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List parcels matching a conjunctive equality filter, newest first.
    ///
    /// Absent filter fields impose no constraint.
    pub async fn list(pool: &PgPool, filter: &ParcelFilter) -> Result<Vec<Parcel>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        if filter.payment_status.is_some() {
            conditions.push(format!("payment_status = ${}", conditions.len() + 1));
        }
        if filter.delivery_status.is_some() {
            conditions.push(format!("delivery_status = ${}", conditions.len() + 1));
        }
        if filter.email.is_some() {
            conditions.push(format!("email = ${}", conditions.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query = format!(
            "SELECT {COLUMNS} FROM parcels{where_clause} ORDER BY created_at DESC, id DESC"
        );

        let mut q = sqlx::query_as::<_, Parcel>(&query);
        if let Some(ref v) = filter.payment_status {
            q = q.bind(v);
        }
        if let Some(ref v) = filter.delivery_status {
            q = q.bind(v);
        }
        if let Some(ref v) = filter.email {
            q = q.bind(v);
        }
        q.fetch_all(pool).await
    }

    /// Hard-delete a parcel. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parcels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a parcel paid, stamping the payment timestamp and transaction
    /// reference. Guarded on the parcel still being unpaid; returns `false`
    /// if the parcel is missing or was already paid.
    pub async fn mark_paid(
        pool: &PgPool,
        id: DbId,
        transaction_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE parcels
             SET payment_status = '{paid}', paid_at = NOW(), transaction_id = $2
             WHERE id = $1 AND payment_status = '{unpaid}'",
            paid = PaymentStatus::Paid.as_str(),
            unpaid = PaymentStatus::Unpaid.as_str(),
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(transaction_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bind a rider to a pending parcel, moving it to `assigned` and
    /// stamping the assignment time. Guarded on the parcel still being
    /// pending; returns `false` if it is missing or already past pending.
    pub async fn bind_rider(
        pool: &PgPool,
        id: DbId,
        rider_id: DbId,
        rider_email: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE parcels
             SET assigned_rider_id = $2, assigned_rider_email = $3,
                 delivery_status = '{assigned}', assigned_at = NOW()
             WHERE id = $1 AND delivery_status = '{pending}'",
            assigned = DeliveryStatus::Assigned.as_str(),
            pending = DeliveryStatus::Pending.as_str(),
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(rider_id)
            .bind(rider_email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move an assigned parcel to `in-transit`. Guarded on the expected
    /// predecessor status so a concurrent transition cannot be overwritten.
    pub async fn mark_in_transit(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE parcels
             SET delivery_status = '{in_transit}', in_transit_at = NOW()
             WHERE id = $1 AND delivery_status = '{assigned}'",
            in_transit = DeliveryStatus::InTransit.as_str(),
            assigned = DeliveryStatus::Assigned.as_str(),
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move an in-transit parcel to `delivered`.
    pub async fn mark_delivered(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE parcels
             SET delivery_status = '{delivered}', delivered_at = NOW()
             WHERE id = $1 AND delivery_status = '{in_transit}'",
            delivered = DeliveryStatus::Delivered.as_str(),
            in_transit = DeliveryStatus::InTransit.as_str(),
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Request cash-out for a delivered parcel: compare-and-set on the
    /// absence of `cash_out_status`, restricted to delivered states so a
    /// cashed-out parcel is always a delivered one. At most one concurrent
    /// caller observes `true`.
    pub async fn cash_out(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE parcels
             SET cash_out_status = '{cashed_out}', cashed_out_at = NOW()
             WHERE id = $1 AND cash_out_status IS NULL
               AND delivery_status IN ('{delivered}', '{service_center}')",
            cashed_out = CASHED_OUT,
            delivered = DeliveryStatus::Delivered.as_str(),
            service_center = DeliveryStatus::ServiceCenterDelivered.as_str(),
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Parcels a rider is currently working: assigned or in transit.
    pub async fn list_active_for_rider(
        pool: &PgPool,
        rider_email: &str,
    ) -> Result<Vec<Parcel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parcels
             WHERE assigned_rider_email = $1
               AND delivery_status IN ('{assigned}', '{in_transit}')
             ORDER BY assigned_at DESC, id DESC",
            assigned = DeliveryStatus::Assigned.as_str(),
            in_transit = DeliveryStatus::InTransit.as_str(),
        );
        sqlx::query_as::<_, Parcel>(&query)
            .bind(rider_email)
            .fetch_all(pool)
            .await
    }

    /// Parcels a rider has completed, most recent assignment first.
    pub async fn list_completed_for_rider(
        pool: &PgPool,
        rider_email: &str,
    ) -> Result<Vec<Parcel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parcels
             WHERE assigned_rider_email = $1
               AND delivery_status IN ('{delivered}', '{service_center}')
             ORDER BY assigned_at DESC, id DESC",
            delivered = DeliveryStatus::Delivered.as_str(),
            service_center = DeliveryStatus::ServiceCenterDelivered.as_str(),
        );
        sqlx::query_as::<_, Parcel>(&query)
            .bind(rider_email)
            .fetch_all(pool)
            .await
    }

    /// Count all parcels grouped by delivery status. Statuses with no
    /// parcels are absent from the result.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT delivery_status AS status, COUNT(*) AS count
             FROM parcels
             GROUP BY delivery_status
             ORDER BY delivery_status",
        )
        .fetch_all(pool)
        .await
    }

    /// Count one rider's parcels grouped by delivery status.
    pub async fn count_by_status_for_rider(
        pool: &PgPool,
        rider_email: &str,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT delivery_status AS status, COUNT(*) AS count
             FROM parcels
             WHERE assigned_rider_email = $1
             GROUP BY delivery_status
             ORDER BY delivery_status",
        )
        .bind(rider_email)
        .fetch_all(pool)
        .await
    }
}
