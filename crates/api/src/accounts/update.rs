//! Sparse, nested account updates.

use buildup_core::error::CoreError;
use buildup_core::types::DbId;
use buildup_db::models::builder::BuilderChanges;
use buildup_db::models::project::ProjectChanges;
use buildup_db::models::user::{User, UserChanges};
use buildup_db::Store;
use serde::Deserialize;

use super::map_email_conflict;
use crate::error::{AppResult, WriteError};
use crate::middleware::rbac::{require_admin, require_owner_or_admin};
use crate::role_graph::RoleGraph;

/// Change-set for a user, optionally reaching into its builder and project.
///
/// Keys not named here are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(flatten)]
    pub user: UserChanges,
    pub builder: Option<BuilderUpdate>,
}

/// Builder level of a [`UserUpdate`].
///
/// `coach_id` is admin only, like [`assign_coach`](super::assign_coach).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderUpdate {
    #[serde(flatten)]
    pub builder: BuilderChanges,
    pub coach_id: Option<DbId>,
    pub project: Option<ProjectChanges>,
}

/// Apply `update` to user `id`, then to its builder, then to the builder's project.
///
/// The caller must be the user or an admin. Each level is stored before the
/// next one is loaded; a failure below the user level reports the already
/// stored user through [`WriteError::committed`].
pub async fn update_user(
    store: &Store,
    caller: Option<&User>,
    id: DbId,
    update: UserUpdate,
) -> Result<User, WriteError> {
    let caller = require_owner_or_admin(caller, id)?;
    if update.builder.as_ref().is_some_and(|b| b.coach_id.is_some()) {
        require_admin(Some(caller))?;
    }

    let mut user = store
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;

    update.user.apply_to(&mut user);
    if !store.users.update(&user).await.map_err(map_email_conflict)? {
        return Err(CoreError::not_found("User", id).into());
    }

    if let Some(builder_update) = update.builder {
        update_builder(store, &user, builder_update)
            .await
            .map_err(|e| WriteError::partial(user.clone(), e))?;
    }

    tracing::info!(user_id = %user.id, caller_id = %caller.id, "User updated");
    Ok(user)
}

async fn update_builder(store: &Store, user: &User, update: BuilderUpdate) -> AppResult<()> {
    let mut builder = store
        .builders
        .find_for_user(user.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Builder", user.id))?;

    update.builder.apply_to(&mut builder);
    if let Some(coach_id) = update.coach_id {
        builder.coach_id = Some(RoleGraph::new(store).coach(coach_id).await?.id);
    }
    if !store.builders.update(&builder).await? {
        return Err(CoreError::not_found("Builder", builder.id).into());
    }

    let Some(changes) = update.project else {
        return Ok(());
    };
    let mut project = store
        .projects
        .find_for_builder(builder.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", builder.id))?;

    changes.apply_to(&mut project);
    if !store.projects.update(&project).await? {
        return Err(CoreError::not_found("Project", project.id).into());
    }
    Ok(())
}
