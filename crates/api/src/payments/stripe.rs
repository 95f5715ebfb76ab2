//! Stripe charge-intent client.

use async_trait::async_trait;
use serde::Deserialize;

use super::{PaymentIntent, PaymentProvider, ProviderError};
use crate::config::PaymentConfig;

/// Thin client for Stripe's `POST /v1/payment_intents`.
pub struct StripeClient {
    http: reqwest::Client,
    config: PaymentConfig,
}

impl StripeClient {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

/// The subset of Stripe's payment-intent response we consume.
#[derive(Debug, Deserialize)]
struct IntentBody {
    client_secret: String,
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_intent(&self, amount_in_cents: i64) -> Result<PaymentIntent, ProviderError> {
        // Stripe's API is form-encoded, not JSON.
        let params = [
            ("amount", amount_in_cents.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.config.api_base))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected(format!("{status}: {body}")));
        }

        let body: IntentBody = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(PaymentIntent {
            client_secret: body.client_secret,
        })
    }
}
