//! Repository for the `assignments` table.

use classroom_core::ranking::AssignmentRecord;
use classroom_core::types::DbId;
use sqlx::PgPool;

use crate::models::assignment::{Assignment, AssignmentRankingRow, CreateAssignment};

/// Column list for assignments queries.
const COLUMNS: &str = "id, unit_id, title, description, due_at, created_by, created_at";

/// Provides CRUD operations for assignments plus the ranking snapshot fetch.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Create an assignment in the given unit, returning the created row.
    pub async fn create(
        pool: &PgPool,
        unit_id: DbId,
        created_by: DbId,
        input: &CreateAssignment,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (unit_id, title, description, due_at, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(unit_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.due_at)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an assignment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a unit's assignments, newest first.
    pub async fn list_by_unit(
        pool: &PgPool,
        unit_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE unit_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(unit_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Fetch every assignment of a unit (by code) in ranking shape.
    pub async fn list_ranking_records_by_unit(
        pool: &PgPool,
        unit_code: &str,
    ) -> Result<Vec<AssignmentRecord>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AssignmentRankingRow>(
            "SELECT a.id, a.title, a.created_at
             FROM assignments a
             JOIN units u ON u.id = a.unit_id
             WHERE u.code = $1",
        )
        .bind(unit_code)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(AssignmentRecord::from).collect())
    }

    /// Fetch every assignment across all units in ranking shape.
    pub async fn list_all_ranking_records(
        pool: &PgPool,
    ) -> Result<Vec<AssignmentRecord>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AssignmentRankingRow>(
            "SELECT id, title, created_at FROM assignments",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(AssignmentRecord::from).collect())
    }
}
