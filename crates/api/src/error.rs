//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"error": <message>, "code": <CODE>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use classroom_core::error::CoreError;
use serde::Serialize;

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type returned by every handler and extractor.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain error from `classroom_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = match &self {
            AppError::Core(err) => core_error_parts(err),
            AppError::Database(err) => classify_sqlx_error(err),
        };

        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn core_error_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { .. }
        | CoreError::UnknownCode { .. }
        | CoreError::NotCompleted { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        CoreError::AlreadyCompleted { .. } => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
    }
}

/// Whether `err` is a unique violation of the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION)
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

/// Map a sqlx error to status, code and a client-safe message.
///
/// Known unique and foreign-key constraints of the portal schema get
/// messages naming the unit, assignment or user involved. Anything else is
/// logged and reported as a generic 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Record does not exist".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or_default();
        match db_err.code().as_deref() {
            Some(PG_UNIQUE_VIOLATION) => {
                if let Some(message) = duplicate_message(constraint) {
                    return (StatusCode::CONFLICT, "CONFLICT", message.to_string());
                }
            }
            Some(PG_FOREIGN_KEY_VIOLATION) => {
                return (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    missing_reference_message(constraint).to_string(),
                );
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Unhandled database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn duplicate_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        "uq_completions_assignment_user" => Some("Assignment is already marked complete"),
        "uq_units_code" => Some("A unit with this code already exists"),
        "uq_users_username" => Some("Username is already taken"),
        _ => None,
    }
}

/// Postgres names unnamed foreign keys `<table>_<column>_fkey`.
fn missing_reference_message(constraint: &str) -> &'static str {
    match constraint {
        "completions_assignment_id_fkey" => "Assignment no longer exists",
        "completions_user_id_fkey" => "User no longer exists",
        "assignments_unit_id_fkey" => "Unit no longer exists",
        "assignments_created_by_fkey" => "Author no longer exists",
        _ => "Referenced record no longer exists",
    }
}
