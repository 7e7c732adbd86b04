//! User entity model and DTOs.
//!
//! Registration, login, and KYC review belong to the identity service; this
//! crate only reads users for ledger preconditions (role, activation, KYC)
//! and creates them from seed tooling and tests.

use brickfund_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role_id: StatusId,
    pub is_active: bool,
    pub kyc_status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub role_id: StatusId,
    /// Defaults to active if omitted.
    pub is_active: Option<bool>,
    /// Defaults to 1 (Pending) if omitted.
    pub kyc_status_id: Option<StatusId>,
}
