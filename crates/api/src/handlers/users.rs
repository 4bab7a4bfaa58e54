//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use buildup_core::types::parse_id;
use buildup_db::models::builder::Builder;
use buildup_db::models::coach::Coach;
use buildup_db::models::user::UserResponse;

use crate::accounts::{self, NewUser, UserUpdate};
use crate::error::{AppResult, WriteError};
use crate::middleware::auth::Caller;
use crate::middleware::rbac::require_caller;
use crate::query::user_filter;
use crate::response::DataResponse;
use crate::role_graph::{Profile, RoleGraph};
use crate::state::AppState;

/// POST /api/v1/users
///
/// Public signup. The body must carry exactly one of `builder` or `coach`.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> Result<(StatusCode, Json<DataResponse<UserResponse>>), WriteError> {
    let user = accounts::create_user(&state.store, &state.credentials, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(user.into()))))
}

/// PATCH /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    Json(input): Json<UserUpdate>,
) -> Result<Json<DataResponse<UserResponse>>, WriteError> {
    let id = parse_id(&id)?;
    let user = accounts::update_user(&state.store, caller.user(), id, input).await?;
    Ok(Json(DataResponse::new(user.into())))
}

/// GET /api/v1/users/me
pub async fn me(caller: Caller) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = require_caller(caller.user())?;
    Ok(Json(DataResponse::new(UserResponse::from(user.clone()))))
}

/// GET /api/v1/users
///
/// Optional query filters: `email`, `role`, `status`, `step`, `firstName`, `lastName`.
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    require_caller(caller.user())?;
    let filter = user_filter(&pairs)?;
    let users = RoleGraph::new(&state.store).users(&filter).await?;
    Ok(Json(DataResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    require_caller(caller.user())?;
    let user = RoleGraph::new(&state.store).user(parse_id(&id)?).await?;
    Ok(Json(DataResponse::new(user.into())))
}

/// GET /api/v1/users/{id}/builder
///
/// `null` when the user has no builder profile.
pub async fn builder(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Option<Builder>>>> {
    require_caller(caller.user())?;
    let graph = RoleGraph::new(&state.store);
    let user = graph.user(parse_id(&id)?).await?;
    Ok(Json(DataResponse::new(graph.user_builder(&user).await?)))
}

/// GET /api/v1/users/{id}/coach
///
/// `null` when the user has no coach profile.
pub async fn coach(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Option<Coach>>>> {
    require_caller(caller.user())?;
    let graph = RoleGraph::new(&state.store);
    let user = graph.user(parse_id(&id)?).await?;
    Ok(Json(DataResponse::new(graph.user_coach(&user).await?)))
}

/// GET /api/v1/users/{id}/profile
pub async fn profile(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Profile>>> {
    require_caller(caller.user())?;
    let graph = RoleGraph::new(&state.store);
    let user = graph.user(parse_id(&id)?).await?;
    Ok(Json(DataResponse::new(graph.user_profile(&user).await?)))
}
