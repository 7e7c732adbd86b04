//! Handler for profit distribution rounds.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use brickfund_core::distribution::{allocate_returns, total_credited};
use brickfund_core::error::CoreError;
use brickfund_core::types::{DbId, Timestamp};
use brickfund_db::models::returns::CreateUserReturn;
use brickfund_db::repositories::{InvestmentRepo, ProjectRepo, ReturnRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthPrincipal;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects/{id}/distributions`.
#[derive(Debug, Deserialize)]
pub struct DistributeRequest {
    /// Profit pool to distribute, in major units as a decimal string.
    pub total_profit: Decimal,
}

/// One investor's credit in the response.
#[derive(Debug, Serialize)]
pub struct CreditEntry {
    pub investor_id: DbId,
    pub amount: Decimal,
}

/// Response for a recorded distribution round.
#[derive(Debug, Serialize)]
pub struct DistributeResponse {
    pub distribution_id: DbId,
    pub project_id: DbId,
    pub total_profit: Decimal,
    /// Sum actually credited; at most `total_profit`. The difference is the
    /// sub-cent truncation remainder, left with the project.
    pub total_credited: Decimal,
    pub distribution_date: Timestamp,
    pub credits: Vec<CreditEntry>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/distributions
///
/// Record one profit-sharing round: allocate `total_profit` across all
/// active shareholders pro-rata and persist the round atomically.
///
/// Deliberately not idempotent: every call records an independent round, so
/// a builder triggering this twice for the same profit event double-credits
/// investors. The service logs a warning when a same-figure round already
/// exists for the project today, but it does not block the call -- a second
/// legitimate round with the same figure must remain possible.
pub async fn distribute(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(project_id): Path<DbId>,
    Json(input): Json<DistributeRequest>,
) -> AppResult<(StatusCode, Json<DistributeResponse>)> {
    // 1. Only the owning builder (or an admin) distributes.
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id: project_id,
        }))?;

    let is_owner = principal.builder_id() == Some(project.builder_id);
    if !is_owner && !principal.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's builder can distribute returns".into(),
        )));
    }

    // 2. Pro-rata allocation over active investments (validates the profit
    //    figure and share counts).
    let investments = InvestmentRepo::active_for_project(&state.pool, project_id).await?;
    let holdings: Vec<(DbId, i64)> = investments
        .iter()
        .map(|inv| (inv.investor_id, inv.shares_purchased))
        .collect();

    let shares = allocate_returns(input.total_profit, project.total_shares, &holdings)?;

    if shares.is_empty() {
        tracing::warn!(
            project_id,
            "distribution requested for a project with no active investments"
        );
    }

    // Likely double-trigger? Warn, don't block.
    let same_round = ReturnRepo::count_same_round_today(&state.pool, project_id, input.total_profit)
        .await?;
    if same_round > 0 {
        tracing::warn!(
            project_id,
            total_profit = %input.total_profit,
            existing_rounds_today = same_round,
            "distribution repeats an identical round from today; double-credit possible"
        );
    }

    // 3. Persist the round atomically.
    let credits: Vec<CreateUserReturn> = shares
        .iter()
        .map(|s| CreateUserReturn {
            investor_id: s.investor_id,
            amount: s.amount,
        })
        .collect();

    let (distribution, rows) =
        ReturnRepo::create_distribution(&state.pool, project_id, input.total_profit, &credits)
            .await?;

    let credited = total_credited(&shares);
    tracing::info!(
        distribution_id = distribution.id,
        project_id,
        total_profit = %input.total_profit,
        total_credited = %credited,
        investors = rows.len(),
        "returns distributed"
    );

    Ok((
        StatusCode::CREATED,
        Json(DistributeResponse {
            distribution_id: distribution.id,
            project_id,
            total_profit: distribution.total_profit,
            total_credited: credited,
            distribution_date: distribution.distribution_date,
            credits: rows
                .into_iter()
                .map(|r| CreditEntry {
                    investor_id: r.investor_id,
                    amount: r.amount,
                })
                .collect(),
        }),
    ))
}
