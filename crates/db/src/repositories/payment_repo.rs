//! Repository for the `payments` table.

use brickfund_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::{CreatePayment, Payment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, investor_id, project_id, amount, status_id, method, \
     transaction_id, gateway_response, created_at, updated_at";

/// Provides payment creation, lookup, and metadata merging.
///
/// The Pending -> Success transition itself lives in
/// [`crate::repositories::InvestmentRepo::settle`] because it must commit in
/// the same transaction as the investment insert.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a new Pending payment keyed by the gateway order id.
    pub async fn create_pending(
        pool: &PgPool,
        input: &CreatePayment,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments
                (investor_id, project_id, amount, method, transaction_id, gateway_response)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.investor_id)
            .bind(input.project_id)
            .bind(input.amount)
            .bind(&input.method)
            .bind(&input.transaction_id)
            .bind(&input.gateway_response)
            .fetch_one(pool)
            .await
    }

    /// Find a payment by its `(transaction_id, investor_id, project_id)`
    /// triple -- the idempotency key for settlement callbacks.
    pub async fn find_by_transaction(
        pool: &PgPool,
        transaction_id: &str,
        investor_id: DbId,
        project_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments
             WHERE transaction_id = $1 AND investor_id = $2 AND project_id = $3"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(transaction_id)
            .bind(investor_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Merge additional gateway metadata into a payment's `gateway_response`.
    ///
    /// Uses the JSONB `||` operator so previously recorded keys survive;
    /// re-delivered callbacks add metadata, they never erase it.
    pub async fn merge_gateway_metadata(
        pool: &PgPool,
        id: DbId,
        metadata: &serde_json::Value,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments
             SET gateway_response = gateway_response || $2::jsonb, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(metadata)
            .fetch_optional(pool)
            .await
    }
}
