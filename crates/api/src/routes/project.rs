//! Route definitions for the `/projects` resource (ledger surface only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project, returns};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET  /{id}/funding        -> funding snapshot
/// POST /{id}/distributions  -> record a distribution round
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/funding", get(project::funding))
        .route("/{id}/distributions", post(returns::distribute))
}
