//! Shared integration-test harness: test config, mock gateway, router
//! construction, HTTP helpers, and database seed helpers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use brickfund_api::auth::jwt::{generate_access_token, JwtConfig};
use brickfund_api::config::{GatewayConfig, ServerConfig};
use brickfund_api::gateway::{GatewayError, GatewayOrder, OrderRequest, PaymentGateway};
use brickfund_api::router::build_app_router;
use brickfund_api::state::AppState;
use brickfund_core::types::DbId;
use brickfund_db::models::investment::SettleInvestment;
use brickfund_db::models::payment::CreatePayment;
use brickfund_db::models::project::CreateProject;
use brickfund_db::models::status::{KycStatus, ProjectStatus, Role, StatusId};
use brickfund_db::models::user::CreateUser;
use brickfund_db::repositories::{InvestmentRepo, PaymentRepo, ProjectRepo, UserRepo};

/// Gateway shared secret used by tests to sign callbacks.
pub const TEST_GATEWAY_SECRET: &str = "test-gateway-secret";

/// Publishable gateway key expected in order responses.
pub const TEST_GATEWAY_KEY_ID: &str = "key_test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-jwt-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        gateway: GatewayConfig {
            provider: "gateway".to_string(),
            base_url: "http://gateway.invalid".to_string(),
            key_id: TEST_GATEWAY_KEY_ID.to_string(),
            key_secret: TEST_GATEWAY_SECRET.to_string(),
            currency: "INR".to_string(),
        },
    }
}

/// In-process gateway: mints sequential order ids without any network I/O.
#[derive(Default)]
pub struct MockGateway {
    counter: AtomicI64,
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayOrder {
            order_id: format!("order_mock_{n}"),
            amount_minor: request.amount_minor,
            currency: request.currency.clone(),
        })
    }
}

/// Build the full application router with all middleware layers, a mock
/// gateway, and the given database pool. Mirrors `main.rs` so tests
/// exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway: Arc::new(MockGateway::default()),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for the given user id and role.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Parse a decimal-string field out of a JSON body.
pub fn decimal_field(body: &serde_json::Value, field: &str) -> Decimal {
    body[field]
        .as_str()
        .unwrap_or_else(|| panic!("{field} should be a decimal string, got {body}"))
        .parse()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str, role: Role, kyc: KycStatus) -> DbId {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            role_id: role.id(),
            is_active: None,
            kyc_status_id: Some(kyc.id()),
        },
    )
    .await
    .expect("user creation should succeed");
    user.id
}

pub async fn create_investor(pool: &PgPool, username: &str) -> DbId {
    create_user(pool, username, Role::Investor, KycStatus::Approved).await
}

pub async fn create_builder(pool: &PgPool, username: &str) -> DbId {
    create_user(pool, username, Role::Builder, KycStatus::Approved).await
}

pub struct ProjectSeed {
    pub price_per_share: Decimal,
    pub min_investment: Decimal,
    pub total_value: Decimal,
    pub total_shares: i64,
    pub status: StatusId,
}

impl Default for ProjectSeed {
    fn default() -> Self {
        Self {
            price_per_share: dec!(100),
            min_investment: dec!(1000),
            total_value: dec!(100000),
            total_shares: 1000,
            status: ProjectStatus::Approved.id(),
        }
    }
}

pub async fn create_project(pool: &PgPool, builder_id: DbId, seed: ProjectSeed) -> DbId {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            builder_id,
            title: "Lakeside Apartments".to_string(),
            price_per_share: seed.price_per_share,
            min_investment: seed.min_investment,
            total_value: seed.total_value,
            total_shares: seed.total_shares,
            status_id: Some(seed.status),
        },
    )
    .await
    .expect("project creation should succeed");
    project.id
}

/// Seed a settled investment directly through the repositories, bypassing
/// the HTTP surface. Used to arrange funding state for capacity tests.
pub async fn seed_settled_investment(
    pool: &PgPool,
    investor_id: DbId,
    project_id: DbId,
    amount: Decimal,
    shares: i64,
    order_id: &str,
) {
    let payment = PaymentRepo::create_pending(
        pool,
        &CreatePayment {
            investor_id,
            project_id,
            amount,
            method: "gateway".to_string(),
            transaction_id: order_id.to_string(),
            gateway_response: json!({"provider": "gateway", "order_id": order_id}),
        },
    )
    .await
    .expect("payment creation should succeed");

    InvestmentRepo::settle(
        pool,
        &SettleInvestment {
            payment_id: payment.id,
            investor_id,
            project_id,
            invested_amount: amount,
            shares_purchased: shares,
            settlement_metadata: json!({"payment_id": format!("pay_{order_id}")}),
        },
    )
    .await
    .expect("settlement should succeed");
}
