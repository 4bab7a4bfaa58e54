pub mod auth;
pub mod builders;
pub mod coachs;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                        login (public)
///
/// /users                             list (auth), create (public signup)
/// /users/me                          caller's own account
/// /users/{id}                        get, sparse update
/// /users/{id}/builder                builder profile or null
/// /users/{id}/coach                  coach profile or null
/// /users/{id}/profile                role-tagged profile
///
/// /builders                          users with the BUILDER role
/// /builders/{id}/project             get, submit
/// /builders/{id}/coach               assigned coach user, assign (admin)
/// /builders/{id}/user                owning user
///
/// /coachs                            users with the COACH role
/// /coachs/{id}/builders              users of assigned builders
/// /coachs/{id}/user                  owning user
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/builders", builders::router())
        .nest("/coachs", coachs::router())
}
