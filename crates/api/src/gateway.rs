//! Payment gateway client.
//!
//! Order creation is the only gateway API this service calls; settlement
//! arrives as a signed callback verified in
//! [`brickfund_core::signature`]. The call is plain HTTP and must never run
//! inside a database transaction -- a slow gateway round-trip must not hold
//! row locks.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::GatewayConfig;

/// Failure talking to the payment gateway. Surfaced to callers as a
/// retryable upstream error; no ledger state is written before the gateway
/// call succeeds.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gateway rejected the order (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// An order to mint with the gateway, in minor currency units.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub amount_minor: i64,
    pub currency: String,
    /// Caller-side reference stored with the gateway order.
    pub receipt: String,
    /// Opaque reconciliation metadata echoed back by the gateway.
    pub notes: serde_json::Value,
}

/// A minted gateway order.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Gateway operations used by the order service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mint an order for the given amount. Idempotency is the gateway's
    /// concern; each call creates a fresh order.
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, GatewayError>;
}

/// HTTP implementation authenticating with `key_id:key_secret` basic auth.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpPaymentGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

/// Order payload returned by the gateway's orders endpoint.
#[derive(Debug, Deserialize)]
struct OrderResponseBody {
    id: String,
    amount: i64,
    currency: String,
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&json!({
                "amount": request.amount_minor,
                "currency": request.currency,
                "receipt": request.receipt,
                "notes": request.notes,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: OrderResponseBody = response.json().await?;
        Ok(GatewayOrder {
            order_id: body.id,
            amount_minor: body.amount,
            currency: body.currency,
        })
    }
}
