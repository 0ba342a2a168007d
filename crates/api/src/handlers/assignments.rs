//! Handlers for the `/assignments` resource and completion marking.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use classroom_core::error::CoreError;
use classroom_core::types::DbId;
use classroom_db::models::assignment::Assignment;
use classroom_db::models::user::User;
use classroom_db::repositories::{AssignmentRepo, CompletionRepo, UserRepo};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_assignment(state: &AppState, id: DbId) -> AppResult<Assignment> {
    AssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Assignment",
                id,
            })
        })
}

/// Resolve the token subject to a portal account. Tokens can outlive the
/// account they were issued for.
async fn find_caller(state: &AppState, user: &AuthUser) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: user.user_id,
            })
        })
}

/// GET /assignments/{id}
pub async fn get_assignment(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignment = find_assignment(&state, id).await?;
    Ok(Json(DataResponse { data: assignment }))
}

/// POST /assignments/{id}/complete
///
/// Mark the assignment complete for the caller. A second completion of the
/// same assignment is a 409.
pub async fn complete_assignment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignment = find_assignment(&state, id).await?;
    let caller = find_caller(&state, &user).await?;

    let completion = CompletionRepo::create(&state.pool, assignment.id, caller.id)
        .await
        .map_err(|err| {
            if is_unique_violation(&err, "uq_completions_assignment_user") {
                AppError::Core(CoreError::AlreadyCompleted {
                    assignment_id: assignment.id,
                })
            } else {
                AppError::Database(err)
            }
        })?;

    tracing::info!(
        user_id = caller.id,
        assignment_id = assignment.id,
        completion_id = completion.id,
        "Assignment marked complete"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: completion })))
}

/// DELETE /assignments/{id}/complete
///
/// Withdraw the caller's completion. 404 if there was none.
pub async fn uncomplete_assignment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CompletionRepo::delete(&state.pool, id, user.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotCompleted { assignment_id: id }));
    }

    tracing::info!(
        user_id = user.user_id,
        assignment_id = id,
        "Assignment completion withdrawn"
    );

    Ok(StatusCode::NO_CONTENT)
}
