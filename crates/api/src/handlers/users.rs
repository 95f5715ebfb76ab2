//! Handlers for user registration, search, and role management.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use parceld_core::error::CoreError;
use parceld_core::roles;
use parceld_core::types::DbId;
use parceld_db::models::user::{CreateUser, UpdateUserRole, User};
use parceld_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::EmailParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /users
// ---------------------------------------------------------------------------

/// Registration outcome: the stored row plus whether this request inserted it.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub inserted: bool,
    pub user: User,
}

/// Register a user. Insert-if-absent: posting an existing email returns the
/// stored row with `inserted: false`, 200 either way.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    if body.email.trim().is_empty() {
        return Err(CoreError::Validation("Missing email".into()).into());
    }

    match UserRepo::insert_if_absent(&state.pool, &body).await? {
        Some(user) => {
            tracing::info!(id = user.id, email = %user.email, "User registered");
            Ok(Json(DataResponse {
                data: RegisteredUser {
                    inserted: true,
                    user,
                },
            }))
        }
        None => {
            let user = UserRepo::find_by_email(&state.pool, &body.email)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(format!(
                        "User '{}' vanished between insert and lookup",
                        body.email
                    ))
                })?;
            Ok(Json(DataResponse {
                data: RegisteredUser {
                    inserted: false,
                    user,
                },
            }))
        }
    }
}

// ---------------------------------------------------------------------------
// GET /users/search
// ---------------------------------------------------------------------------

/// Case-insensitive email substring search, capped at 10 rows.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<EmailParams>,
) -> AppResult<impl IntoResponse> {
    let fragment = params
        .email
        .ok_or_else(|| AppError::BadRequest("Missing email query".into()))?;
    let items = UserRepo::search_by_email(&state.pool, &fragment).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /users/{email}/role
// ---------------------------------------------------------------------------

/// A user's role, for any authenticated caller.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: String,
}

/// Look up the role of an account by email.
pub async fn get_role(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                key: email.clone(),
            })
        })?;
    Ok(Json(DataResponse {
        data: RoleResponse { role: user.role },
    }))
}

// ---------------------------------------------------------------------------
// PATCH /users/{id}/role
// ---------------------------------------------------------------------------

/// Set a user's role. Only `admin` and `user` can be granted here; the
/// rider role is reachable exclusively through rider approval.
pub async fn update_role(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateUserRole>,
) -> AppResult<impl IntoResponse> {
    // This path position also serves the email-keyed role lookup, so the id
    // arrives as a string.
    let id: DbId = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid user id '{raw_id}'")))?;

    roles::validate_assignable_role(&body.role)?;

    let user = UserRepo::set_role(&state.pool, id, &body.role)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                key: id.to_string(),
            })
        })?;

    tracing::info!(user_id = id, role = %body.role, "User role updated");
    Ok(Json(DataResponse { data: user }))
}
