use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /me               -> me
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// GET    /{id}/builder     -> builder
/// GET    /{id}/coach       -> coach
/// GET    /{id}/profile     -> profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/me", get(users::me))
        .route("/{id}", get(users::get_by_id).patch(users::update))
        .route("/{id}/builder", get(users::builder))
        .route("/{id}/coach", get(users::coach))
        .route("/{id}/profile", get(users::profile))
}
