//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::accounts::{self, LoginRequest};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/v1/auth/login
///
/// Exchange email + password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    let token = accounts::login(&state.store, &state.credentials, &input.email, &input.password)
        .await?;
    Ok(Json(DataResponse::new(TokenResponse { token })))
}
