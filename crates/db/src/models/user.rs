//! User entity model and DTOs.

use parceld_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for registering a user. Registration is insert-if-absent: posting an
/// existing email is a no-op, not an error.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub display_name: Option<String>,
}

/// Body of `PATCH /users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRole {
    pub role: String,
}
