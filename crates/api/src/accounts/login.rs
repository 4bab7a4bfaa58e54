use std::sync::Arc;

use buildup_core::error::CoreError;
use buildup_db::Store;
use serde::Deserialize;

use super::verify_password;
use crate::auth::CredentialService;
use crate::error::AppResult;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn mismatch() -> CoreError {
    CoreError::CredentialMismatch("Invalid email or password".into())
}

/// Exchange an email and password for a session token.
///
/// An unknown email and a wrong password fail with the same error.
pub async fn login(
    store: &Store,
    credentials: &Arc<CredentialService>,
    email: &str,
    password: &str,
) -> AppResult<String> {
    let Some(user) = store.users.find_by_email(email).await? else {
        tracing::info!("Login failed");
        return Err(mismatch().into());
    };

    if !verify_password(credentials, password.to_string(), user.password_hash.clone()).await? {
        tracing::info!(user_id = %user.id, "Login failed");
        return Err(mismatch().into());
    }

    let token = credentials.issue_token(user.id)?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(token)
}
