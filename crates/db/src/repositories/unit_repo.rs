//! Repository for the `units` table.

use sqlx::PgPool;

use crate::models::unit::{CreateUnit, Unit};

/// Column list for units queries.
const COLUMNS: &str = "id, code, name, created_at";

/// Provides CRUD operations for units.
pub struct UnitRepo;

impl UnitRepo {
    /// Insert a new unit, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUnit) -> Result<Unit, sqlx::Error> {
        let query = format!(
            "INSERT INTO units (code, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a unit by its public code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units WHERE code = $1");
        sqlx::query_as::<_, Unit>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all units ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units ORDER BY code ASC");
        sqlx::query_as::<_, Unit>(&query).fetch_all(pool).await
    }
}
