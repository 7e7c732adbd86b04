//! Investment entity model and DTOs.

use brickfund_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// An investment row from the `investments` table.
///
/// At most one row per `(investor_id, project_id)`, enforced by
/// `uq_investments_investor_project`. `invested_amount` is always an exact
/// multiple of the project's price per share.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Investment {
    pub id: DbId,
    pub investor_id: DbId,
    pub project_id: DbId,
    pub invested_amount: Decimal,
    pub shares_purchased: i64,
    pub status_id: StatusId,
    pub created_at: Timestamp,
}

/// Input for the atomic settlement commit: the investment to create plus the
/// payment transition it must be committed with.
#[derive(Debug, Clone, Deserialize)]
pub struct SettleInvestment {
    pub payment_id: DbId,
    pub investor_id: DbId,
    pub project_id: DbId,
    pub invested_amount: Decimal,
    pub shares_purchased: i64,
    /// Gateway payment id + callback signature, merged into the payment's
    /// `gateway_response` for reconciliation.
    pub settlement_metadata: serde_json::Value,
}
