//! Project entity model and DTOs.

use brickfund_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub builder_id: DbId,
    pub title: String,
    pub price_per_share: Decimal,
    pub min_investment: Decimal,
    /// Funding target; the aggregate raised amount never exceeds this.
    pub total_value: Decimal,
    pub total_shares: i64,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub builder_id: DbId,
    pub title: String,
    pub price_per_share: Decimal,
    pub min_investment: Decimal,
    pub total_value: Decimal,
    pub total_shares: i64,
    /// Defaults to 1 (Draft) if omitted.
    pub status_id: Option<StatusId>,
}
