//! Route definitions for assignments. Mounted at `/assignments` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Assignment routes.
///
/// ```text
/// GET    /{id}               -> get_assignment
/// POST   /{id}/complete      -> complete_assignment
/// DELETE /{id}/complete      -> uncomplete_assignment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(assignments::get_assignment))
        .route(
            "/{id}/complete",
            post(assignments::complete_assignment).delete(assignments::uncomplete_assignment),
        )
}
