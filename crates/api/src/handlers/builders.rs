//! Handlers for the `/builders` resource.
//!
//! `GET /builders` lists the *users* holding the BUILDER role; the
//! `{id}` routes address builder profile records.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use buildup_core::roles::Role;
use buildup_core::types::{parse_id, DbId};
use buildup_db::models::builder::Builder;
use buildup_db::models::project::Project;
use buildup_db::models::user::UserResponse;
use serde::Deserialize;

use crate::accounts::{self, NewProject};
use crate::error::AppResult;
use crate::middleware::auth::Caller;
use crate::middleware::rbac::require_caller;
use crate::response::DataResponse;
use crate::role_graph::RoleGraph;
use crate::state::AppState;

/// Request body for `PUT /builders/{id}/coach`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCoachRequest {
    pub coach_id: DbId,
}

/// GET /api/v1/builders
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    require_caller(caller.user())?;
    let users = RoleGraph::new(&state.store)
        .users_with_role(Role::Builder)
        .await?;
    Ok(Json(DataResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/v1/builders/{id}/project
pub async fn project(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Project>>> {
    require_caller(caller.user())?;
    let graph = RoleGraph::new(&state.store);
    let builder = graph.builder(parse_id(&id)?).await?;
    Ok(Json(DataResponse::new(graph.builder_project(&builder).await?)))
}

/// GET /api/v1/builders/{id}/coach
///
/// The assigned coach's user, or `null`.
pub async fn coach(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Option<UserResponse>>>> {
    require_caller(caller.user())?;
    let graph = RoleGraph::new(&state.store);
    let builder = graph.builder(parse_id(&id)?).await?;
    let coach = graph.builder_coach(&builder).await?;
    Ok(Json(DataResponse::new(coach.map(UserResponse::from))))
}

/// GET /api/v1/builders/{id}/user
pub async fn user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    require_caller(caller.user())?;
    let graph = RoleGraph::new(&state.store);
    let builder = graph.builder(parse_id(&id)?).await?;
    Ok(Json(DataResponse::new(graph.builder_user(&builder).await?.into())))
}

/// PUT /api/v1/builders/{id}/coach
///
/// Admin only.
pub async fn assign_coach(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    Json(input): Json<AssignCoachRequest>,
) -> AppResult<Json<DataResponse<Builder>>> {
    let builder =
        accounts::assign_coach(&state.store, caller.user(), parse_id(&id)?, input.coach_id)
            .await?;
    Ok(Json(DataResponse::new(builder)))
}

/// POST /api/v1/builders/{id}/project
///
/// The builder's own user or an admin; fails with 409 if a project exists.
pub async fn submit_project(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    Json(input): Json<NewProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project =
        accounts::submit_project(&state.store, caller.user(), parse_id(&id)?, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(project))))
}
