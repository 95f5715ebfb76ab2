//! Route definitions for user accounts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST  /               -> register (insert-if-absent)
/// GET   /search         -> email substring search
/// GET   /{email}/role   -> role lookup (auth required)
/// PATCH /{email}/role   -> role update (admin, id-keyed)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/search", get(users::search))
        .route("/{email}/role", get(users::get_role).patch(users::update_role))
}
