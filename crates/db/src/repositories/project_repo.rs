//! Repository for the `projects` table.

use brickfund_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};
use crate::models::status::ProjectStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, builder_id, title, price_per_share, min_investment, \
     total_value, total_shares, status_id, created_at, updated_at";

/// Provides read access and the funded transition for projects.
///
/// General project CRUD (listing, editing, approval) belongs to the project
/// service; the ledger only reads projects and performs the one status
/// transition it owns, Approved -> Funded.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `status_id` is `None` in the input, defaults to 1 (Draft).
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (builder_id, title, price_per_share, min_investment, total_value, total_shares, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.builder_id)
            .bind(&input.title)
            .bind(input.price_per_share)
            .bind(input.min_investment)
            .bind(input.total_value)
            .bind(input.total_shares)
            .bind(input.status_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Transition a project from Approved to Funded.
    ///
    /// Monotonic: the `WHERE status_id = Approved` guard makes the call a
    /// no-op when the project is already Funded (or anything else), so
    /// concurrent post-commit funding checks cannot regress the status.
    /// Returns `true` if this call performed the transition.
    pub async fn mark_funded(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET status_id = $2, updated_at = NOW()
             WHERE id = $1 AND status_id = $3",
        )
        .bind(id)
        .bind(ProjectStatus::Funded.id())
        .bind(ProjectStatus::Approved.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
