use crate::types::DbId;

/// Domain errors raised by the portal, independent of transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row looked up by numeric id does not exist.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// A row looked up by its public code (units) does not exist.
    #[error("{entity} '{code}' does not exist")]
    UnknownCode { entity: &'static str, code: String },

    /// Caller input failed a domain rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The caller already has a completion for this assignment.
    #[error("Assignment {assignment_id} is already marked complete")]
    AlreadyCompleted { assignment_id: DbId },

    /// The caller has no completion to withdraw for this assignment.
    #[error("Assignment {assignment_id} has not been marked complete")]
    NotCompleted { assignment_id: DbId },

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credentials without the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
