//! Repository for the `return_distributions` and `user_returns` tables.

use brickfund_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::returns::{CreateUserReturn, ReturnDistribution, UserReturn};

const DISTRIBUTION_COLUMNS: &str = "id, project_id, total_profit, distribution_date";
const RETURN_COLUMNS: &str = "id, distribution_id, investor_id, amount, credited_at";

/// Provides distribution persistence and lookups.
pub struct ReturnRepo;

impl ReturnRepo {
    /// Persist one distribution round: the header row plus every investor
    /// credit, in a single transaction. A partial distribution (some
    /// investors credited, others not) is never observable.
    ///
    /// Deliberately not idempotent: each call records an independent
    /// profit-sharing round. Guarding against an accidental double-trigger
    /// for the same round is the caller's responsibility.
    pub async fn create_distribution(
        pool: &PgPool,
        project_id: DbId,
        total_profit: Decimal,
        credits: &[CreateUserReturn],
    ) -> Result<(ReturnDistribution, Vec<UserReturn>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_distribution = format!(
            "INSERT INTO return_distributions (project_id, total_profit)
             VALUES ($1, $2)
             RETURNING {DISTRIBUTION_COLUMNS}"
        );
        let distribution = sqlx::query_as::<_, ReturnDistribution>(&insert_distribution)
            .bind(project_id)
            .bind(total_profit)
            .fetch_one(&mut *tx)
            .await?;

        let insert_return = format!(
            "INSERT INTO user_returns (distribution_id, investor_id, amount)
             VALUES ($1, $2, $3)
             RETURNING {RETURN_COLUMNS}"
        );
        let mut rows = Vec::with_capacity(credits.len());
        for credit in credits {
            let row = sqlx::query_as::<_, UserReturn>(&insert_return)
                .bind(distribution.id)
                .bind(credit.investor_id)
                .bind(credit.amount)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok((distribution, rows))
    }

    /// All distribution rounds for a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ReturnDistribution>, sqlx::Error> {
        let query = format!(
            "SELECT {DISTRIBUTION_COLUMNS} FROM return_distributions
             WHERE project_id = $1 ORDER BY distribution_date DESC"
        );
        sqlx::query_as::<_, ReturnDistribution>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// The credits recorded for one distribution round.
    pub async fn list_for_distribution(
        pool: &PgPool,
        distribution_id: DbId,
    ) -> Result<Vec<UserReturn>, sqlx::Error> {
        let query = format!(
            "SELECT {RETURN_COLUMNS} FROM user_returns
             WHERE distribution_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, UserReturn>(&query)
            .bind(distribution_id)
            .fetch_all(pool)
            .await
    }

    /// Count of distribution rounds recorded today for a project with the
    /// same profit figure. Used to warn on likely double-triggers.
    pub async fn count_same_round_today(
        pool: &PgPool,
        project_id: DbId,
        total_profit: Decimal,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM return_distributions
             WHERE project_id = $1 AND total_profit = $2
               AND distribution_date::date = NOW()::date",
        )
        .bind(project_id)
        .bind(total_profit)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
