pub mod health;
pub mod investment;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /investments/orders               mint gateway order (POST, investor)
/// /investments/verify               verify callback + settle (POST, investor)
///
/// /projects/{id}/funding            funding snapshot (GET, any principal)
/// /projects/{id}/distributions      record a distribution round (POST, builder)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/investments", investment::router())
        .nest("/projects", project::router())
}
