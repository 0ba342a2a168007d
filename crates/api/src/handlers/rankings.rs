//! Handlers for unit and overall leaderboards.
//!
//! The handlers fetch assignment/completion snapshots through the
//! repositories and delegate ordering to `classroom_core::ranking`. Latencies
//! are returned both as milliseconds and as a humanized string derived from
//! the same value.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use classroom_core::humanize::humanize_latency_ms;
use classroom_core::ranking::{compute_rankings, RankingEntry, RecentCompletion, UnitRankings};
use classroom_core::types::{DbId, Timestamp};
use classroom_db::repositories::{AssignmentRepo, CompletionRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::units::find_unit;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One leaderboard row as returned over HTTP.
#[derive(Debug, Serialize)]
pub struct RankingEntryResponse {
    pub position: u32,
    pub user_id: DbId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub completion_count: u32,
    pub average_latency_ms: i64,
    pub average_latency_human: String,
    pub recent_completions: Vec<RecentCompletionResponse>,
}

/// A recent completion on a leaderboard row.
#[derive(Debug, Serialize)]
pub struct RecentCompletionResponse {
    pub assignment_id: DbId,
    pub title: String,
    pub completed_at: Timestamp,
    pub latency_ms: i64,
    pub latency_human: String,
}

impl From<RecentCompletion> for RecentCompletionResponse {
    fn from(c: RecentCompletion) -> Self {
        Self {
            assignment_id: c.assignment_id,
            title: c.title,
            completed_at: c.completed_at,
            latency_human: humanize_latency_ms(c.latency_ms),
            latency_ms: c.latency_ms,
        }
    }
}

impl From<RankingEntry> for RankingEntryResponse {
    fn from(e: RankingEntry) -> Self {
        Self {
            position: e.position,
            user_id: e.user_id,
            user_name: e.user_name,
            user_avatar: e.user_avatar,
            completion_count: e.completion_count,
            average_latency_human: humanize_latency_ms(e.average_latency_ms),
            average_latency_ms: e.average_latency_ms,
            recent_completions: e
                .recent_completions
                .into_iter()
                .map(RecentCompletionResponse::from)
                .collect(),
        }
    }
}

fn into_response_rows(rankings: UnitRankings) -> Vec<RankingEntryResponse> {
    rankings
        .entries
        .into_iter()
        .map(RankingEntryResponse::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /units/{code}/rankings
///
/// Leaderboard for one unit. A unit without completions returns an empty list.
pub async fn unit_rankings(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let unit = find_unit(&state, &code).await?;

    let assignments = AssignmentRepo::list_ranking_records_by_unit(&state.pool, &unit.code).await?;
    let completions = if assignments.is_empty() {
        Vec::new()
    } else {
        CompletionRepo::list_ranking_records_by_unit(&state.pool, &unit.code).await?
    };

    let rankings = compute_rankings(&assignments, &completions);

    if rankings.unresolved_completions > 0 {
        tracing::warn!(
            unit = %unit.code,
            unresolved = rankings.unresolved_completions,
            "Completions referenced assignments missing from the snapshot"
        );
    }
    tracing::debug!(
        unit = %unit.code,
        assignments = assignments.len(),
        completions = completions.len(),
        ranked = rankings.entries.len(),
        "Unit rankings computed"
    );

    Ok(Json(DataResponse {
        data: into_response_rows(rankings),
    }))
}

/// GET /rankings
///
/// Cross-unit leaderboard over every assignment and completion.
pub async fn overall_rankings(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let assignments = AssignmentRepo::list_all_ranking_records(&state.pool).await?;
    let completions = CompletionRepo::list_all_ranking_records(&state.pool).await?;

    let rankings = compute_rankings(&assignments, &completions);

    if rankings.unresolved_completions > 0 {
        tracing::warn!(
            unresolved = rankings.unresolved_completions,
            "Completions referenced assignments missing from the snapshot"
        );
    }

    Ok(Json(DataResponse {
        data: into_response_rows(rankings),
    }))
}
