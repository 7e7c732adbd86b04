use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All non-secret fields have sensible defaults suitable for local
/// development. In production, override via environment variables.
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
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Payment gateway credentials and endpoint.
    pub gateway: GatewayConfig,
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
            gateway: GatewayConfig::from_env(),
        }
    }
}

/// Payment gateway configuration.
///
/// `key_id` is the publishable key returned to clients with each order;
/// `key_secret` signs callback verification and authenticates API calls and
/// must never appear in a response body.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Provider label recorded on payments (default: `gateway`).
    pub provider: String,
    /// Gateway REST base URL (default: `https://api.gateway.test`).
    pub base_url: String,
    /// Publishable key id.
    pub key_id: String,
    /// Shared secret for order API auth and callback HMAC verification.
    pub key_secret: String,
    /// ISO currency code orders are minted in (default: `INR`).
    pub currency: String,
}

impl GatewayConfig {
    /// Load gateway configuration from environment variables.
    ///
    /// | Env Var              | Required | Default                    |
    /// |----------------------|----------|----------------------------|
    /// | `GATEWAY_PROVIDER`   | no       | `gateway`                  |
    /// | `GATEWAY_BASE_URL`   | no       | `https://api.gateway.test` |
    /// | `GATEWAY_KEY_ID`     | **yes**  | --                         |
    /// | `GATEWAY_KEY_SECRET` | **yes**  | --                         |
    /// | `GATEWAY_CURRENCY`   | no       | `INR`                      |
    ///
    /// # Panics
    ///
    /// Panics if either key variable is missing or empty.
    pub fn from_env() -> Self {
        let key_id = std::env::var("GATEWAY_KEY_ID")
            .expect("GATEWAY_KEY_ID must be set in the environment");
        let key_secret = std::env::var("GATEWAY_KEY_SECRET")
            .expect("GATEWAY_KEY_SECRET must be set in the environment");
        assert!(!key_id.is_empty(), "GATEWAY_KEY_ID must not be empty");
        assert!(!key_secret.is_empty(), "GATEWAY_KEY_SECRET must not be empty");

        Self {
            provider: std::env::var("GATEWAY_PROVIDER").unwrap_or_else(|_| "gateway".into()),
            base_url: std::env::var("GATEWAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.gateway.test".into()),
            key_id,
            key_secret,
            currency: std::env::var("GATEWAY_CURRENCY").unwrap_or_else(|_| "INR".into()),
        }
    }
}
