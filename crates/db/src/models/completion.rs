//! Completion model: a user finished an assignment at a point in time.

use classroom_core::ranking::CompletionRecord;
use classroom_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `completions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Completion {
    pub id: DbId,
    pub assignment_id: DbId,
    pub user_id: DbId,
    pub completed_at: Timestamp,
}

/// A completion joined with the completing user's display fields.
#[derive(Debug, Clone, FromRow)]
pub struct CompletionRankingRow {
    pub user_id: DbId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub assignment_id: DbId,
    pub completed_at: Timestamp,
}

impl From<CompletionRankingRow> for CompletionRecord {
    fn from(row: CompletionRankingRow) -> Self {
        Self {
            user_id: row.user_id,
            user_name: row.user_name,
            user_avatar: row.user_avatar,
            assignment_id: row.assignment_id,
            completed_at: row.completed_at,
        }
    }
}
