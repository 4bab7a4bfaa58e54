//! Account Orchestrator.
//!
//! Multi-step writes over the role graph. None of them run in a transaction:
//! once the user record is stored it stays stored, and a failure in a later
//! step comes back as a [`WriteError`](crate::error::WriteError) carrying
//! that user.
//!
//! Every operation that needs an identity takes the caller explicitly as
//! `Option<&User>`.

pub mod assignment;
pub mod create;
pub mod login;
pub mod update;

use std::sync::Arc;

use buildup_core::error::CoreError;
use buildup_db::constraints::UQ_USERS_EMAIL;
use buildup_db::StoreError;

use crate::auth::CredentialService;
use crate::error::{AppError, AppResult};

pub use assignment::{assign_coach, submit_project};
pub use create::{create_user, ensure_admin, NewBuilder, NewCoach, NewProject, NewUser};
pub use login::{login, LoginRequest};
pub use update::{update_user, BuilderUpdate, UserUpdate};

fn email_taken() -> CoreError {
    CoreError::Conflict("A user with this email already exists".into())
}

/// Translate the email unique constraint into the domain conflict.
fn map_email_conflict(err: StoreError) -> AppError {
    if err.violates(UQ_USERS_EMAIL) {
        email_taken().into()
    } else {
        err.into()
    }
}

/// Hash off the async runtime; Argon2 at production cost takes hundreds of ms.
async fn hash_password(
    credentials: &Arc<CredentialService>,
    password: String,
) -> AppResult<String> {
    let credentials = Arc::clone(credentials);
    tokio::task::spawn_blocking(move || credentials.hash(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("hashing task failed: {e}")))?
        .map_err(AppError::from)
}

async fn verify_password(
    credentials: &Arc<CredentialService>,
    password: String,
    digest: String,
) -> AppResult<bool> {
    let credentials = Arc::clone(credentials);
    tokio::task::spawn_blocking(move || credentials.verify(&password, &digest))
        .await
        .map_err(|e| AppError::InternalError(format!("verification task failed: {e}")))
}
