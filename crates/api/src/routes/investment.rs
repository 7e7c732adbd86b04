//! Route definitions for the `/investments` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::investment;
use crate::state::AppState;

/// Routes mounted at `/investments`.
///
/// ```text
/// POST /orders  -> create_order
/// POST /verify  -> verify_payment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(investment::create_order))
        .route("/verify", post(investment::verify_payment))
}
