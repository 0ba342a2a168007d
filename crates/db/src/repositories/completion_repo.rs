//! Repository for the `completions` table.

use classroom_core::ranking::CompletionRecord;
use classroom_core::types::DbId;
use sqlx::PgPool;

use crate::models::completion::{Completion, CompletionRankingRow};

/// Column list for completions queries.
const COLUMNS: &str = "id, assignment_id, user_id, completed_at";

/// Columns of the completion/user join consumed by the ranking computation.
const RANKING_COLUMNS: &str = "c.user_id, u.display_name AS user_name, \
    u.avatar_url AS user_avatar, c.assignment_id, c.completed_at";

/// Provides completion bookkeeping plus the ranking snapshot fetch.
pub struct CompletionRepo;

impl CompletionRepo {
    /// Record that `user_id` completed `assignment_id` now.
    ///
    /// A second completion of the same pair violates
    /// `uq_completions_assignment_user`.
    pub async fn create(
        pool: &PgPool,
        assignment_id: DbId,
        user_id: DbId,
    ) -> Result<Completion, sqlx::Error> {
        let query = format!(
            "INSERT INTO completions (assignment_id, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Completion>(&query)
            .bind(assignment_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a user's completion of an assignment. Returns `true` if a row
    /// was deleted.
    pub async fn delete(
        pool: &PgPool,
        assignment_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM completions WHERE assignment_id = $1 AND user_id = $2")
                .bind(assignment_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List one user's completions within a unit, newest first.
    pub async fn list_by_user_in_unit(
        pool: &PgPool,
        unit_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<Completion>, sqlx::Error> {
        sqlx::query_as::<_, Completion>(
            "SELECT c.id, c.assignment_id, c.user_id, c.completed_at
             FROM completions c
             JOIN assignments a ON a.id = c.assignment_id
             WHERE a.unit_id = $1 AND c.user_id = $2
             ORDER BY c.completed_at DESC",
        )
        .bind(unit_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Fetch every completion of a unit's assignments (by unit code), joined
    /// with the completing user's display fields.
    pub async fn list_ranking_records_by_unit(
        pool: &PgPool,
        unit_code: &str,
    ) -> Result<Vec<CompletionRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RANKING_COLUMNS}
             FROM completions c
             JOIN users u ON u.id = c.user_id
             JOIN assignments a ON a.id = c.assignment_id
             JOIN units un ON un.id = a.unit_id
             WHERE un.code = $1"
        );
        let rows = sqlx::query_as::<_, CompletionRankingRow>(&query)
            .bind(unit_code)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CompletionRecord::from).collect())
    }

    /// Fetch every completion across all units, joined with user display fields.
    pub async fn list_all_ranking_records(
        pool: &PgPool,
    ) -> Result<Vec<CompletionRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RANKING_COLUMNS}
             FROM completions c
             JOIN users u ON u.id = c.user_id"
        );
        let rows = sqlx::query_as::<_, CompletionRankingRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CompletionRecord::from).collect())
    }
}
