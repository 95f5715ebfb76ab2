use std::sync::Arc;

use crate::config::ServerConfig;
use crate::payments::PaymentProvider;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The pool and the
/// payment provider are injected once at process start and live for the
/// process lifetime.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: parceld_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// External payment provider (charge-intent creation).
    pub payments: Arc<dyn PaymentProvider>,
}
