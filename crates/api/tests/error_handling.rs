//! `AppError` / `WriteError` to HTTP response mapping.
//!
//! Calls `IntoResponse` directly; no router involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use buildup_api::auth::CredentialError;
use buildup_api::error::{AppError, WriteError};
use buildup_core::error::CoreError;
use buildup_core::roles::{Role, UserStatus, UserStep};
use buildup_db::models::user::User;
use buildup_db::StoreError;
use http_body_util::BodyExt;

async fn render(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn app_error(err: impl Into<AppError>) -> (StatusCode, serde_json::Value) {
    render(err.into().into_response()).await
}

fn stored_user() -> User {
    User {
        id: buildup_core::types::new_id(),
        created_at: chrono::Utc::now(),
        email: "kept@buildup.test".into(),
        role: Role::Builder,
        status: UserStatus::Candidating,
        step: UserStep::Preselected,
        first_name: "Kept".into(),
        last_name: "User".into(),
        situation: String::new(),
        description: String::new(),
        birthdate: None,
        address: None,
        discord: None,
        linkedin: None,
        password_hash: "$argon2id$secret".into(),
    }
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_core_error_has_one_status() {
    let cases = [
        (CoreError::not_found("User", "x"), StatusCode::NOT_FOUND, "NOT_FOUND"),
        (CoreError::InvalidIdentifier("x".into()), StatusCode::BAD_REQUEST, "INVALID_IDENTIFIER"),
        (CoreError::Validation("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        (CoreError::RoleViolation("x".into()), StatusCode::BAD_REQUEST, "ROLE_VIOLATION"),
        (CoreError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
        (CoreError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        (
            CoreError::CredentialMismatch("x".into()),
            StatusCode::UNAUTHORIZED,
            "CREDENTIAL_MISMATCH",
        ),
        (CoreError::InvalidToken("x".into()), StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
        (CoreError::Forbidden("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
        (CoreError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    ];
    for (err, status, code) in cases {
        let (actual, json) = app_error(err).await;
        assert_eq!(actual, status);
        assert_eq!(json["code"], code);
    }
}

#[tokio::test]
async fn not_found_message_names_the_entity() {
    let (_, json) = app_error(CoreError::not_found("Project", "abc")).await;
    assert_eq!(json["error"], "Project not found: abc");
}

// ---------------------------------------------------------------------------
// Store and credential errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unique_violation_is_conflict() {
    let (status, json) = app_error(StoreError::UniqueViolation {
        constraint: "uq_users_email".into(),
    })
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn store_failure_is_sanitised() {
    let (status, json) = app_error(StoreError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn credential_errors() {
    let (status, _) = app_error(CredentialError::InvalidToken("expired".into())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = app_error(CredentialError::Signing("bad key".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json["error"].as_str().unwrap().contains("bad key"));
}

// ---------------------------------------------------------------------------
// Partial writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn write_error_without_commit_renders_like_app_error() {
    let err = WriteError::from(CoreError::Conflict("taken".into()));
    let (status, json) = render(err.into_response()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json.get("committed").is_none());
}

#[tokio::test]
async fn partial_write_carries_committed_user_without_hash() {
    let user = stored_user();
    let err = WriteError::partial(user.clone(), CoreError::not_found("Project", user.id));
    let (status, json) = render(err.into_response()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["committed"]["id"], user.id.to_string());
    assert_eq!(json["committed"]["firstName"], "Kept");
    assert!(json["committed"].get("passwordHash").is_none());
}
