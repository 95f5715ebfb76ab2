//! Route definitions for payments.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Payment routes, mounted at the root because the intent endpoint is not
/// under `/payments`.
///
/// ```text
/// POST /payments               -> confirm payment
/// GET  /payments               -> history (admin, own email only)
/// POST /create-payment-intent  -> delegate to the payment provider
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments", get(payments::list).post(payments::confirm))
        .route("/create-payment-intent", post(payments::create_intent))
}
