use std::sync::Arc;

use crate::config::ServerConfig;
use crate::gateway::PaymentGateway;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: brickfund_db::DbPool,
    /// Server configuration (JWT secret, gateway keys, timeouts).
    pub config: Arc<ServerConfig>,
    /// Payment gateway client; tests inject a mock implementation.
    pub gateway: Arc<dyn PaymentGateway>,
}
