//! Route definitions for units. Mounted at `/units` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{rankings, units};
use crate::state::AppState;

/// Unit routes.
///
/// ```text
/// GET    /                          -> list_units
/// GET    /{code}                    -> get_unit
/// GET    /{code}/assignments        -> list_assignments (?limit, offset)
/// POST   /{code}/assignments        -> create_assignment (teacher)
/// GET    /{code}/rankings           -> unit_rankings
/// GET    /{code}/completions/me     -> list_my_completions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(units::list_units))
        .route("/{code}", get(units::get_unit))
        .route(
            "/{code}/assignments",
            get(units::list_assignments).post(units::create_assignment),
        )
        .route("/{code}/rankings", get(rankings::unit_rankings))
        .route("/{code}/completions/me", get(units::list_my_completions))
}

