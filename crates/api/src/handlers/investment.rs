//! Handlers for the `/investments` resource: gateway order creation and
//! payment verification/settlement.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use brickfund_core::error::{CoreError, LedgerError};
use brickfund_core::money;
use brickfund_core::principal::Principal;
use brickfund_core::signature::verify_order_signature;
use brickfund_core::types::DbId;
use brickfund_db::models::investment::SettleInvestment;
use brickfund_db::models::payment::CreatePayment;
use brickfund_db::models::project::Project;
use brickfund_db::models::status::{KycStatus, PaymentStatus, ProjectStatus, Role};
use brickfund_db::models::user::User;
use brickfund_db::repositories::{InvestmentRepo, PaymentRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::gateway::OrderRequest;
use crate::middleware::auth::AuthPrincipal;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /investments/orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub project_id: DbId,
    /// Requested amount in major units, as a decimal string.
    pub amount: Decimal,
}

/// Response for a successfully minted order.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// The amount actually charged: whole shares only, never the raw request.
    pub amount: Decimal,
    pub currency: String,
    /// The gateway's publishable key. The key secret never leaves the server.
    pub key_id: String,
}

/// Request body for `POST /investments/verify` -- the gateway settlement
/// callback relayed by the client.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub project_id: DbId,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    /// Client-reported amount. A hint only; the charged amount is always
    /// recomputed from the stored payment.
    pub amount: Decimal,
}

/// Response for a settled (or already-settled) investment.
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub investment_id: DbId,
    pub project_id: DbId,
    pub shares_purchased: i64,
    pub invested_amount: Decimal,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/investments/orders
///
/// Mint a gateway order for a prospective investment and persist a Pending
/// payment keyed by the gateway order id. No investment is created here;
/// order creation is not settlement.
pub async fn create_order(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<CreateOrderResponse>)> {
    // 1. Only investors place orders.
    let investor_id = require_investor(principal)?;

    if input.amount <= Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "amount must be a positive decimal".into(),
        )));
    }

    // 2. Investor gates: account exists, active, KYC approved.
    check_investor_gates(&state, investor_id).await?;

    // 3. Project gates: exists and open for investment.
    let project = require_open_project(&state, input.project_id).await?;

    // 4. Whole-share conversion first; every later gate checks the amount
    //    that will actually be charged, never the raw request.
    let quote = money::compute_shares(input.amount, project.price_per_share)?;

    // 5. Amount gates against the charged amount: minimum floor, then
    //    remaining capacity from the freshly aggregated funding total.
    //    Checking the raw request instead would mint orders the settlement
    //    re-check must reject (a non-share-aligned minimum shrinks the
    //    charged amount below the floor).
    money::check_minimum(quote.actual_amount, project.min_investment)?;
    let raised = InvestmentRepo::total_active_amount(&state.pool, project.id).await?;
    let remaining = money::remaining_capacity(project.total_value, raised);
    money::check_capacity(quote.actual_amount, remaining)?;

    // 6. One investment per (investor, project); repeat attempts are
    //    rejected, not merged.
    if InvestmentRepo::find_by_pair(&state.pool, investor_id, project.id)
        .await?
        .is_some()
    {
        return Err(AppError::Ledger(LedgerError::AlreadyInvested));
    }

    let amount_minor = money::to_minor_units(quote.actual_amount).ok_or_else(|| {
        AppError::Core(CoreError::Validation("amount out of representable range".into()))
    })?;

    // 7. Gateway call, outside any database transaction.
    let receipt = format!("inv-{investor_id}-{}", Uuid::new_v4());
    let order = state
        .gateway
        .create_order(&OrderRequest {
            amount_minor,
            currency: state.config.gateway.currency.clone(),
            receipt,
            notes: json!({
                "investor_id": investor_id,
                "project_id": project.id,
            }),
        })
        .await?;

    // 8. Persist the Pending payment keyed by the gateway order id.
    let payment = PaymentRepo::create_pending(
        &state.pool,
        &CreatePayment {
            investor_id,
            project_id: project.id,
            amount: quote.actual_amount,
            method: state.config.gateway.provider.clone(),
            transaction_id: order.order_id.clone(),
            gateway_response: json!({
                "provider": state.config.gateway.provider,
                "order_id": order.order_id,
                "amount": quote.actual_amount,
                "currency": order.currency,
            }),
        },
    )
    .await?;

    tracing::info!(
        payment_id = payment.id,
        investor_id,
        project_id = project.id,
        order_id = %order.order_id,
        amount = %quote.actual_amount,
        shares = quote.shares,
        "payment order created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order_id: order.order_id,
            amount: quote.actual_amount,
            currency: order.currency,
            key_id: state.config.gateway.key_id.clone(),
        }),
    ))
}

/// POST /api/v1/investments/verify
///
/// Verify a gateway settlement callback and atomically commit the
/// investment. Repeated delivery of the same callback is a no-op success;
/// every failure after the signature gate leaves the payment Pending so a
/// retry with corrected state can succeed later.
pub async fn verify_payment(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(input): Json<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyPaymentResponse>> {
    // 1. Authenticity gate. Runs before any state is read or mutated.
    if !verify_order_signature(
        &state.config.gateway.key_secret,
        &input.order_id,
        &input.payment_id,
        &input.signature,
    ) {
        tracing::warn!(
            order_id = %input.order_id,
            project_id = input.project_id,
            "payment callback signature mismatch"
        );
        return Err(AppError::Ledger(LedgerError::InvalidSignature));
    }

    let investor_id = require_investor(principal)?;

    // 2. Idempotency: look up the payment by its callback key.
    let payment = PaymentRepo::find_by_transaction(
        &state.pool,
        &input.order_id,
        investor_id,
        input.project_id,
    )
    .await?
    .ok_or(AppError::Ledger(LedgerError::PaymentNotFound))?;

    if payment.status_id == PaymentStatus::Success.id() {
        // Duplicate callback delivery: report the existing settlement.
        let investment = InvestmentRepo::find_by_pair(&state.pool, investor_id, input.project_id)
            .await?
            .ok_or_else(|| {
                // A Success payment always commits with its investment.
                AppError::InternalError(format!(
                    "payment {} is settled but has no investment",
                    payment.id
                ))
            })?;
        return Ok(Json(VerifyPaymentResponse {
            investment_id: investment.id,
            project_id: investment.project_id,
            shares_purchased: investment.shares_purchased,
            invested_amount: investment.invested_amount,
        }));
    }

    // 3. Re-validate business invariants against current data. Capacity may
    //    have been consumed by concurrent settlements since order time.
    check_investor_gates(&state, investor_id).await?;
    let project = require_open_project(&state, input.project_id).await?;
    money::check_minimum(payment.amount, project.min_investment)?;
    let raised = InvestmentRepo::total_active_amount(&state.pool, project.id).await?;
    let remaining = money::remaining_capacity(project.total_value, raised);
    money::check_capacity(payment.amount, remaining)?;

    // 4. Authoritative share computation from the stored payment amount and
    //    current share price -- never from the client-reported figures.
    let quote = money::compute_shares(payment.amount, project.price_per_share)?;

    // 5. Atomic commit: investment insert + payment Success in one
    //    transaction. A concurrent settlement for the same pair resolves
    //    through the already-settled path as a no-op success.
    let outcome = InvestmentRepo::settle(
        &state.pool,
        &SettleInvestment {
            payment_id: payment.id,
            investor_id,
            project_id: project.id,
            invested_amount: quote.actual_amount,
            shares_purchased: quote.shares,
            settlement_metadata: json!({
                "payment_id": input.payment_id,
                "signature": input.signature,
            }),
        },
    )
    .await?;
    let investment = outcome.investment().clone();

    tracing::info!(
        investment_id = investment.id,
        investor_id,
        project_id = project.id,
        amount = %investment.invested_amount,
        shares = investment.shares_purchased,
        "payment settled"
    );

    // 6. Funding transition, from a fresh post-commit aggregate.
    let raised = InvestmentRepo::total_active_amount(&state.pool, project.id).await?;
    if raised >= project.total_value && ProjectRepo::mark_funded(&state.pool, project.id).await? {
        tracing::info!(
            project_id = project.id,
            raised = %raised,
            target = %project.total_value,
            "project fully funded"
        );
    }

    Ok(Json(VerifyPaymentResponse {
        investment_id: investment.id,
        project_id: investment.project_id,
        shares_purchased: investment.shares_purchased,
        invested_amount: investment.invested_amount,
    }))
}

// ---------------------------------------------------------------------------
// Precondition helpers
// ---------------------------------------------------------------------------

/// The caller must be an investor principal.
fn require_investor(principal: Principal) -> Result<DbId, AppError> {
    principal.investor_id().ok_or_else(|| {
        AppError::Core(CoreError::Forbidden(
            "Only investors can perform this operation".into(),
        ))
    })
}

/// Investor account gates, checked at order time and re-checked at
/// settlement time: the row must exist with the investor role, be active,
/// and have approved KYC.
async fn check_investor_gates(state: &AppState, investor_id: DbId) -> Result<User, AppError> {
    let user = UserRepo::find_by_id(&state.pool, investor_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
        })?;

    if user.role_id != Role::Investor.id() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account does not have the investor role".into(),
        )));
    }
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    if user.kyc_status_id != KycStatus::Approved.id() {
        return Err(AppError::Core(CoreError::Forbidden(
            "KYC verification is not approved".into(),
        )));
    }
    Ok(user)
}

/// The project must exist and be open for investment (Approved).
async fn require_open_project(state: &AppState, project_id: DbId) -> Result<Project, AppError> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id: project_id,
        }))?;

    if project.status_id != ProjectStatus::Approved.id() {
        return Err(AppError::Ledger(LedgerError::ProjectNotOpen));
    }
    Ok(project)
}
