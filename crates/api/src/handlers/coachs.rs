//! Handlers for the `/coachs` resource.

use axum::extract::{Path, State};
use axum::Json;
use buildup_core::roles::Role;
use buildup_core::types::parse_id;
use buildup_db::models::user::UserResponse;

use crate::error::AppResult;
use crate::middleware::auth::Caller;
use crate::middleware::rbac::require_caller;
use crate::response::DataResponse;
use crate::role_graph::RoleGraph;
use crate::state::AppState;

/// GET /api/v1/coachs
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    require_caller(caller.user())?;
    let users = RoleGraph::new(&state.store)
        .users_with_role(Role::Coach)
        .await?;
    Ok(Json(DataResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/v1/coachs/{id}/builders
///
/// Users of the builders assigned to this coach; empty when there are none.
pub async fn builders(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    require_caller(caller.user())?;
    let graph = RoleGraph::new(&state.store);
    let coach = graph.coach(parse_id(&id)?).await?;
    let users = graph.coach_builders(&coach).await?;
    Ok(Json(DataResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/v1/coachs/{id}/user
pub async fn user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    require_caller(caller.user())?;
    let graph = RoleGraph::new(&state.store);
    let coach = graph.coach(parse_id(&id)?).await?;
    Ok(Json(DataResponse::new(graph.coach_user(&coach).await?.into())))
}
