//! Return distribution entity models and DTOs.

use brickfund_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A distribution round header from the `return_distributions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReturnDistribution {
    pub id: DbId,
    pub project_id: DbId,
    pub total_profit: Decimal,
    pub distribution_date: Timestamp,
}

/// One investor's credit from the `user_returns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserReturn {
    pub id: DbId,
    pub distribution_id: DbId,
    pub investor_id: DbId,
    pub amount: Decimal,
    pub credited_at: Timestamp,
}

/// DTO for one credit in a distribution round.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserReturn {
    pub investor_id: DbId,
    pub amount: Decimal,
}
