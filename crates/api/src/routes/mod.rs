pub mod assignments;
pub mod health;
pub mod units;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /units                                   list units
/// /units/{code}                            get unit
/// /units/{code}/assignments                list, create (teacher only)
/// /units/{code}/rankings                   unit leaderboard
/// /units/{code}/completions/me             caller's completions in the unit
///
/// /assignments/{id}                        get assignment
/// /assignments/{id}/complete               mark complete (POST), withdraw (DELETE)
///
/// /rankings                                overall leaderboard across units
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/units", units::router())
        .nest("/assignments", assignments::router())
        .route("/rankings", get(handlers::rankings::overall_rankings))
}
