//! Unit (course/subject) model.

use classroom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `units` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Unit {
    pub id: DbId,
    /// Public identifier used in URLs, e.g. `CS101`.
    pub code: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new unit.
#[derive(Debug, Deserialize)]
pub struct CreateUnit {
    pub code: String,
    pub name: String,
}
