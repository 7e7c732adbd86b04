//! Payment entity model and DTOs.

use brickfund_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A payment row from the `payments` table.
///
/// Created Pending when a gateway order is minted, flipped to Success
/// exactly once at settlement, never deleted. `transaction_id` is the
/// gateway order id; the gateway payment id arrives later and is merged
/// into `gateway_response`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub investor_id: DbId,
    pub project_id: DbId,
    pub amount: Decimal,
    pub status_id: StatusId,
    pub method: String,
    pub transaction_id: String,
    /// Opaque gateway metadata, merged (`||`) on update, never overwritten.
    pub gateway_response: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a pending payment at order time.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayment {
    pub investor_id: DbId,
    pub project_id: DbId,
    pub amount: Decimal,
    pub method: String,
    pub transaction_id: String,
    pub gateway_response: serde_json::Value,
}
