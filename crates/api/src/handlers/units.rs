//! Handlers for the `/units` resource.
//!
//! Units are addressed by their public code (e.g. `/units/CS101`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use classroom_core::error::CoreError;
use classroom_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use classroom_core::validation::{validate_assignment_title, validate_unit_code};
use classroom_db::models::assignment::CreateAssignment;
use classroom_db::models::unit::Unit;
use classroom_db::repositories::{AssignmentRepo, CompletionRepo, UnitRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireTeacher};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate a unit code from the path and load the unit, or 404.
pub(crate) async fn find_unit(state: &AppState, code: &str) -> AppResult<Unit> {
    validate_unit_code(code)?;

    UnitRepo::find_by_code(&state.pool, code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::UnknownCode {
                entity: "Unit",
                code: code.to_string(),
            })
        })
}

/// GET /units
///
/// List all units ordered by code.
pub async fn list_units(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let units = UnitRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: units }))
}

/// GET /units/{code}
pub async fn get_unit(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let unit = find_unit(&state, &code).await?;
    Ok(Json(DataResponse { data: unit }))
}

/// GET /units/{code}/assignments?limit=&offset=
///
/// List a unit's assignments, newest first.
pub async fn list_assignments(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let unit = find_unit(&state, &code).await?;

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let assignments = AssignmentRepo::list_by_unit(&state.pool, unit.id, limit, offset).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// POST /units/{code}/assignments
///
/// Publish a new assignment. Its creation time is the baseline for
/// completion latency.
pub async fn create_assignment(
    RequireTeacher(user): RequireTeacher,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<CreateAssignment>,
) -> AppResult<impl IntoResponse> {
    validate_assignment_title(&input.title)?;
    let unit = find_unit(&state, &code).await?;

    let assignment = AssignmentRepo::create(&state.pool, unit.id, user.user_id, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        unit = %unit.code,
        assignment_id = assignment.id,
        "Assignment created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// GET /units/{code}/completions/me
///
/// List the caller's completions within the unit, newest first.
pub async fn list_my_completions(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let unit = find_unit(&state, &code).await?;
    let completions =
        CompletionRepo::list_by_user_in_unit(&state.pool, unit.id, user.user_id).await?;
    Ok(Json(DataResponse { data: completions }))
}
