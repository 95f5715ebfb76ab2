use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// External payment provider configuration.
    pub payment: PaymentConfig,
}

/// Configuration for the external payment provider.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Provider secret key used as HTTP basic-auth username.
    pub secret_key: String,
    /// Provider API base URL. Overridable so tests can point at a stub.
    pub api_base: String,
}

impl PaymentConfig {
    /// Load payment configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                  |
    /// |--------------------|----------|--------------------------|
    /// | `PAYMENT_KEY`      | **yes**  | --                       |
    /// | `PAYMENT_API_BASE` | no       | `https://api.stripe.com` |
    ///
    /// # Panics
    ///
    /// Panics if `PAYMENT_KEY` is not set.
    pub fn from_env() -> Self {
        let secret_key =
            std::env::var("PAYMENT_KEY").expect("PAYMENT_KEY must be set in the environment");
        let api_base = std::env::var("PAYMENT_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com".into());
        Self {
            secret_key,
            api_base,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            payment: PaymentConfig::from_env(),
        }
    }
}
