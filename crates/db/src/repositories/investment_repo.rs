//! Repository for the `investments` table, including the atomic settlement
//! commit and the project funding aggregation.

use brickfund_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::investment::{Investment, SettleInvestment};
use crate::models::status::{InvestmentStatus, PaymentStatus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, investor_id, project_id, invested_amount, shares_purchased, \
     status_id, created_at";

/// Outcome of an atomic settlement commit.
#[derive(Debug, Clone)]
pub enum SettleOutcome {
    /// This call created the investment and flipped the payment to Success.
    Created(Investment),
    /// An investment for the pair already existed (earlier callback or a
    /// concurrent settlement won the race); only payment metadata was
    /// merged. From the caller's perspective the investment succeeded.
    AlreadySettled(Investment),
}

impl SettleOutcome {
    pub fn investment(&self) -> &Investment {
        match self {
            Self::Created(inv) | Self::AlreadySettled(inv) => inv,
        }
    }
}

/// Provides investment queries and the settlement transaction.
pub struct InvestmentRepo;

impl InvestmentRepo {
    /// Find the investment for an `(investor, project)` pair, if any.
    pub async fn find_by_pair(
        pool: &PgPool,
        investor_id: DbId,
        project_id: DbId,
    ) -> Result<Option<Investment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM investments WHERE investor_id = $1 AND project_id = $2");
        sqlx::query_as::<_, Investment>(&query)
            .bind(investor_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// All Active investments for a project, oldest first.
    pub async fn active_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Investment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM investments
             WHERE project_id = $1 AND status_id = $2
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Investment>(&query)
            .bind(project_id)
            .bind(InvestmentStatus::Active.id())
            .fetch_all(pool)
            .await
    }

    /// Total amount raised for a project: `SUM(invested_amount)` over Active
    /// investments, freshly aggregated on every call.
    ///
    /// This is deliberately not a cached running counter -- summing the
    /// committed rows means the figure reflects the transaction set exactly
    /// and cannot drift under concurrent settlements.
    pub async fn total_active_amount(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Decimal, sqlx::Error> {
        let row: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(invested_amount), 0)
             FROM investments WHERE project_id = $1 AND status_id = $2",
        )
        .bind(project_id)
        .bind(InvestmentStatus::Active.id())
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// The atomic settlement commit: create the investment and flip its
    /// payment to Success in one transaction.
    ///
    /// Re-checks the `(investor, project)` pair inside the transaction; if a
    /// row already exists the payment only receives the settlement metadata
    /// and the existing investment is reported. A concurrent insert that
    /// slips between the check and our insert trips
    /// `uq_investments_investor_project`, which resolves the same way --
    /// the loser completes as a no-op success.
    ///
    /// A reader can never observe a Success payment without its paired
    /// investment: both writes commit together or not at all.
    pub async fn settle(
        pool: &PgPool,
        input: &SettleInvestment,
    ) -> Result<SettleOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Already settled by an earlier callback?
        let select_pair =
            format!("SELECT {COLUMNS} FROM investments WHERE investor_id = $1 AND project_id = $2");
        let existing = sqlx::query_as::<_, Investment>(&select_pair)
            .bind(input.investor_id)
            .bind(input.project_id)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(investment) = existing {
            Self::merge_payment_metadata(&mut tx, input).await?;
            tx.commit().await?;
            return Ok(SettleOutcome::AlreadySettled(investment));
        }

        let insert = format!(
            "INSERT INTO investments
                (investor_id, project_id, invested_amount, shares_purchased)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Investment>(&insert)
            .bind(input.investor_id)
            .bind(input.project_id)
            .bind(input.invested_amount)
            .bind(input.shares_purchased)
            .fetch_one(&mut *tx)
            .await;

        let investment = match inserted {
            Ok(investment) => investment,
            Err(err) if is_pair_unique_violation(&err) => {
                // Lost the race to a concurrent settlement. Abandon this
                // transaction and resolve through the already-exists path.
                drop(tx);
                tracing::info!(
                    investor_id = input.investor_id,
                    project_id = input.project_id,
                    "concurrent settlement won the investment insert; treating as settled"
                );
                let investment = Self::find_by_pair(pool, input.investor_id, input.project_id)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;

                let mut tx = pool.begin().await?;
                Self::merge_payment_metadata(&mut tx, input).await?;
                tx.commit().await?;
                return Ok(SettleOutcome::AlreadySettled(investment));
            }
            Err(err) => return Err(err),
        };

        // Flip the payment to Success, merging the settlement metadata.
        sqlx::query(
            "UPDATE payments
             SET status_id = $2,
                 gateway_response = gateway_response || $3::jsonb,
                 updated_at = NOW()
             WHERE id = $1 AND status_id = $4",
        )
        .bind(input.payment_id)
        .bind(PaymentStatus::Success.id())
        .bind(&input.settlement_metadata)
        .bind(PaymentStatus::Pending.id())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(SettleOutcome::Created(investment))
    }

    /// Merge settlement metadata into the payment row inside `tx`, without
    /// touching its status. Used on the already-settled paths.
    async fn merge_payment_metadata(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &SettleInvestment,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE payments
             SET gateway_response = gateway_response || $2::jsonb, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(input.payment_id)
        .bind(&input.settlement_metadata)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

/// Whether a sqlx error is the `(investor, project)` unique violation.
fn is_pair_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        // PostgreSQL unique constraint violation: error code 23505.
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_investments_investor_project")
        }
        _ => false,
    }
}
