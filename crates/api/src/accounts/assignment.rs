//! Writes on an existing builder: coach assignment and project submission.

use buildup_core::error::CoreError;
use buildup_core::types::DbId;
use buildup_db::models::builder::Builder;
use buildup_db::models::project::Project;
use buildup_db::models::user::User;
use buildup_db::Store;

use super::create::NewProject;
use crate::error::AppResult;
use crate::middleware::rbac::{require_admin, require_caller, require_owner_or_admin};
use crate::role_graph::RoleGraph;

/// Point builder `builder_id` at coach `coach_id`. Admin only.
pub async fn assign_coach(
    store: &Store,
    caller: Option<&User>,
    builder_id: DbId,
    coach_id: DbId,
) -> AppResult<Builder> {
    let admin = require_admin(caller)?;
    let graph = RoleGraph::new(store);
    let mut builder = graph.builder(builder_id).await?;
    let coach = graph.coach(coach_id).await?;

    builder.coach_id = Some(coach.id);
    if !store.builders.update(&builder).await? {
        return Err(CoreError::not_found("Builder", builder_id).into());
    }

    tracing::info!(%builder_id, %coach_id, admin_id = %admin.id, "Coach assigned");
    Ok(builder)
}

/// Create the project of a builder that has none yet.
///
/// Allowed for the builder's own user and for admins.
pub async fn submit_project(
    store: &Store,
    caller: Option<&User>,
    builder_id: DbId,
    project: NewProject,
) -> AppResult<Project> {
    require_caller(caller)?;
    let builder = RoleGraph::new(store).builder(builder_id).await?;
    require_owner_or_admin(caller, builder.user_id)?;

    if store.projects.find_for_builder(builder.id).await?.is_some() {
        return Err(CoreError::Conflict("This builder already has a project".into()).into());
    }

    let project = store.projects.create(&project.into_create(builder.id)).await?;
    tracing::info!(%builder_id, project_id = %project.id, "Project submitted");
    Ok(project)
}
