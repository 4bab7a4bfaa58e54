//! Auth gate: resolves the bearer token on every request into a [`Caller`].
//!
//! - no `Authorization` header (or an empty one): anonymous
//! - a token that fails validation: rejected with 401
//! - a valid token naming a user that no longer exists: anonymous
//!
//! Handlers receive the result through the [`Caller`] extractor and pass it
//! on to the operations explicitly.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use buildup_core::error::CoreError;
use buildup_db::models::user::User;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The user behind the current request, if any.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<User>);

impl Caller {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}

/// Middleware installed with `axum::middleware::from_fn_with_state`.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let caller = resolve_caller(&state, request.headers()).await?;
    request.extensions_mut().insert(Caller(caller));
    Ok(next.run(request).await)
}

/// Turn the `Authorization` header into the calling user.
pub async fn resolve_caller(state: &AppState, headers: &HeaderMap) -> AppResult<Option<User>> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| CoreError::InvalidToken("Authorization header is not valid text".into()))?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let user_id = state.credentials.parse_token(raw).map_err(AppError::from)?;

    match state.store.users.find_by_id(user_id).await {
        Ok(Some(user)) => Ok(Some(user)),
        Ok(None) => {
            tracing::debug!(%user_id, "Token names a missing user, continuing anonymously");
            Ok(None)
        }
        Err(err) => {
            tracing::warn!(%user_id, error = %err, "Caller lookup failed, continuing anonymously");
            Ok(None)
        }
    }
}
