//! Read-only project funding snapshot.

use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use brickfund_core::error::CoreError;
use brickfund_core::money::remaining_capacity;
use brickfund_core::types::DbId;
use brickfund_db::models::status::StatusId;
use brickfund_db::repositories::{InvestmentRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthPrincipal;
use crate::state::AppState;

/// Response for `GET /projects/{id}/funding`.
#[derive(Debug, Serialize)]
pub struct FundingResponse {
    pub project_id: DbId,
    pub total_value: Decimal,
    /// Freshly aggregated sum of active invested amounts.
    pub raised: Decimal,
    pub remaining: Decimal,
    pub status_id: StatusId,
}

/// GET /api/v1/projects/{id}/funding
///
/// Current funding state, computed from committed investments on every call.
pub async fn funding(
    State(state): State<AppState>,
    AuthPrincipal(_principal): AuthPrincipal,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<FundingResponse>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id: project_id,
        }))?;

    let raised = InvestmentRepo::total_active_amount(&state.pool, project_id).await?;

    Ok(Json(FundingResponse {
        project_id,
        total_value: project.total_value,
        remaining: remaining_capacity(project.total_value, raised),
        raised,
        status_id: project.status_id,
    }))
}
