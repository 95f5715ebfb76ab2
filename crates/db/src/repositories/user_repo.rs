//! Repository for the `users` table.

use parceld_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, display_name, role, created_at";

/// Provides registration and role operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user if the email is not yet registered.
    ///
    /// Returns `Some(row)` when a row was inserted and `None` when the email
    /// already existed (a no-op, not an error -- `uq_users_email` backs the
    /// `ON CONFLICT` clause).
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, display_name)
             VALUES ($1, $2)
             ON CONFLICT (email) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.display_name)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (exact, case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive substring search over emails, capped at 10 rows.
    pub async fn search_by_email(pool: &PgPool, fragment: &str) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE email ILIKE $1
             ORDER BY created_at DESC, id DESC
             LIMIT 10"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(format!("%{fragment}%"))
            .fetch_all(pool)
            .await
    }

    /// Set a user's role by internal ID, returning the updated row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_role(
        pool: &PgPool,
        id: DbId,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Set a user's role by email. Used by rider approval to promote the
    /// matching account. Returns `true` if a row was updated.
    pub async fn set_role_by_email(
        pool: &PgPool,
        email: &str,
        role: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE email = $1")
            .bind(email)
            .bind(role)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
