use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use buildup_core::error::CoreError;
use buildup_db::models::user::{User, UserResponse};
use buildup_db::StoreError;
use serde_json::json;

use crate::auth::CredentialError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds store and credential
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Whether this is a `NotFound` for the given entity name.
    pub fn is_not_found(&self, entity: &str) -> bool {
        matches!(self, AppError::Core(core) if core.is_not_found(entity))
    }

    /// Status, machine-readable code, and client-facing message.
    ///
    /// Internal failures are logged here and replaced by a generic message.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::InvalidIdentifier(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_IDENTIFIER", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::RoleViolation(msg) => {
                    (StatusCode::BAD_REQUEST, "ROLE_VIOLATION", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::CredentialMismatch(msg) => {
                    (StatusCode::UNAUTHORIZED, "CREDENTIAL_MISMATCH", msg.clone())
                }
                CoreError::InvalidToken(msg) => {
                    (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => internal(msg),
            },

            AppError::Store(StoreError::UniqueViolation { constraint }) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            ),
            AppError::Store(err @ StoreError::Database(_)) => internal(&err.to_string()),

            AppError::Credential(CredentialError::InvalidToken(_)) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token".to_string(),
            ),
            AppError::Credential(err) => internal(&err.to_string()),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg),
        }
    }
}

fn internal(detail: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Failure of a multi-step account write.
///
/// Account writes span several records with no transaction. When a later
/// step fails, `committed` holds the user record that was already persisted
/// so the caller can see what survived.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct WriteError {
    pub committed: Option<User>,
    #[source]
    pub error: AppError,
}

impl WriteError {
    /// A failure after `committed` was persisted.
    pub fn partial(committed: User, error: impl Into<AppError>) -> Self {
        Self {
            committed: Some(committed),
            error: error.into(),
        }
    }
}

impl From<AppError> for WriteError {
    fn from(error: AppError) -> Self {
        Self {
            committed: None,
            error,
        }
    }
}

macro_rules! write_error_from {
    ($($source:ty),+) => {
        $(impl From<$source> for WriteError {
            fn from(error: $source) -> Self {
                AppError::from(error).into()
            }
        })+
    };
}

write_error_from!(CoreError, StoreError, CredentialError);

impl IntoResponse for WriteError {
    fn into_response(self) -> Response {
        let Some(committed) = self.committed else {
            return self.error.into_response();
        };
        let (status, code, message) = self.error.classify();
        tracing::warn!(
            user_id = %committed.id,
            code,
            "Account write left partial state"
        );
        let body = json!({
            "error": message,
            "code": code,
            "committed": UserResponse::from(committed),
        });
        (status, axum::Json(body)).into_response()
    }
}
