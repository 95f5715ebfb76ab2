//! Payment-provider integration.
//!
//! Charge intents are created by an external provider; the lifecycle engine
//! only ever consumes the confirmation signal (`POST /payments`). The
//! provider is injected into [`crate::state::AppState`] as a trait object so
//! integration tests can substitute a stub.

pub mod stripe;

pub use stripe::StripeClient;

use async_trait::async_trait;

/// A created charge intent, handed back to the client for checkout.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub client_secret: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not be reached or returned garbage.
    #[error("Payment provider request failed: {0}")]
    Transport(String),

    /// The provider reached a decision and said no.
    #[error("Payment provider rejected the request: {0}")]
    Rejected(String),
}

/// External charge-intent creation.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a charge intent for the given amount in cents.
    async fn create_intent(&self, amount_in_cents: i64) -> Result<PaymentIntent, ProviderError>;
}
