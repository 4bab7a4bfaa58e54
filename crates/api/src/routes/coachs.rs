use axum::routing::get;
use axum::Router;

use crate::handlers::coachs;
use crate::state::AppState;

/// Routes mounted at `/coachs`.
///
/// ```text
/// GET    /                 -> list
/// GET    /{id}/builders    -> builders
/// GET    /{id}/user        -> user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(coachs::list))
        .route("/{id}/builders", get(coachs::builders))
        .route("/{id}/user", get(coachs::user))
}
