use axum::routing::get;
use axum::Router;

use crate::handlers::builders;
use crate::state::AppState;

/// Routes mounted at `/builders`.
///
/// ```text
/// GET    /                 -> list
/// GET    /{id}/project     -> project
/// POST   /{id}/project     -> submit_project
/// GET    /{id}/coach       -> coach
/// PUT    /{id}/coach       -> assign_coach
/// GET    /{id}/user        -> user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(builders::list))
        .route(
            "/{id}/project",
            get(builders::project).post(builders::submit_project),
        )
        .route(
            "/{id}/coach",
            get(builders::coach).put(builders::assign_coach),
        )
        .route("/{id}/user", get(builders::user))
}
