//! Assignment model and DTOs.

use classroom_core::ranking::AssignmentRecord;
use classroom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assignments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Assignment {
    pub id: DbId,
    pub unit_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating an assignment. The unit comes from the URL path.
#[derive(Debug, Deserialize)]
pub struct CreateAssignment {
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<Timestamp>,
}

/// The subset of an assignment the ranking computation needs.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRankingRow {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}

impl From<AssignmentRankingRow> for AssignmentRecord {
    fn from(row: AssignmentRankingRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            created_at: row.created_at,
        }
    }
}
