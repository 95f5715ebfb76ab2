//! Repository for the `payments` table. Append-only.

use sqlx::PgPool;

use crate::models::payment::{ConfirmPayment, Payment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, parcel_id, email, amount, payment_method, transaction_id, paid_at";

/// Provides append and listing operations for payment history.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Append one payment record, returning the created row.
    pub async fn create(pool: &PgPool, input: &ConfirmPayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (parcel_id, email, amount, payment_method, transaction_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.parcel_id)
            .bind(&input.email)
            .bind(input.amount)
            .bind(&input.payment_method)
            .bind(&input.transaction_id)
            .fetch_one(pool)
            .await
    }

    /// Payments made by one payer, newest first.
    pub async fn list_by_email(pool: &PgPool, email: &str) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE email = $1 ORDER BY paid_at DESC, id DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }
}
