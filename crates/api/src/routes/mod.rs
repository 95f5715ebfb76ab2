pub mod health;
pub mod parcels;
pub mod payments;
pub mod riders;
pub mod summary;
pub mod tracking;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (mounted at the root).
///
/// Route hierarchy:
///
/// ```text
/// /users                       register (insert-if-absent)
/// /users/search                email substring search
/// /users/{email}/role          role lookup (auth) / role update (admin)
///
/// /parcels                     list (filters), create
/// /parcels/{id}                get, delete
/// /parcels/{id}/assign         bind rider (PATCH)
/// /parcels/{id}/status         advance delivery status (PATCH)
/// /parcels/{id}/cashout        request cash-out (PATCH)
///
/// /riders                      apply
/// /riders/pending              pending applications (admin)
/// /riders/approved             approved riders (admin)
/// /riders/available            approved riders by district
/// /riders/{id}/status          approval update (PATCH)
///
/// /rider/parcels               active parcels for a rider (rider)
/// /rider/completed-parcels     completed parcels for a rider (rider)
/// /rider/status-summary        per-rider status counts (rider)
///
/// /tracking                    append event
/// /tracking/{trackingId}       ascending history
///
/// /payments                    confirm payment (POST) / history (GET, admin)
/// /create-payment-intent       delegate to the payment provider
///
/// /admin/parcel-status-counts  global status counts (admin)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/parcels", parcels::router())
        .nest("/riders", riders::router())
        .nest("/rider", riders::rider_view_router())
        .nest("/tracking", tracking::router())
        .merge(payments::router())
        .nest("/admin", summary::admin_router())
}
