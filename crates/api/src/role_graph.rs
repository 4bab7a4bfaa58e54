//! Role-Graph Resolver.
//!
//! Navigates the edges between users, their role profiles, the coach
//! assigned to a builder, and a builder's project. Every method is a read
//! that issues a bounded number of store queries.

use buildup_core::error::CoreError;
use buildup_core::roles::Role;
use buildup_core::types::DbId;
use buildup_db::models::builder::Builder;
use buildup_db::models::coach::Coach;
use buildup_db::models::project::Project;
use buildup_db::models::user::{User, UserFilter};
use buildup_db::Store;
use serde::Serialize;

use crate::error::AppResult;

/// A user's role-specific record.
///
/// The inner `Option` is `None` when the profile record for that role is
/// missing, which only happens after a partial account write.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", content = "profile", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profile {
    Admin,
    Builder(Option<Builder>),
    Coach(Option<Coach>),
}

pub struct RoleGraph<'a> {
    store: &'a Store,
}

impl<'a> RoleGraph<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The user with `id`. Absence is `NotFound`.
    pub async fn user(&self, id: DbId) -> AppResult<User> {
        self.store
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("User", id).into())
    }

    pub async fn builder(&self, id: DbId) -> AppResult<Builder> {
        self.store
            .builders
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Builder", id).into())
    }

    pub async fn coach(&self, id: DbId) -> AppResult<Coach> {
        self.store
            .coachs
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Coach", id).into())
    }

    pub async fn users(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        Ok(self.store.users.list(filter).await?)
    }

    /// Every user holding `role`; backs the builder and coach directories.
    pub async fn users_with_role(&self, role: Role) -> AppResult<Vec<User>> {
        self.users(&UserFilter::by_role(role)).await
    }

    /// The project owned by `builder`. A builder without one is `NotFound`.
    pub async fn builder_project(&self, builder: &Builder) -> AppResult<Project> {
        self.store
            .projects
            .find_for_builder(builder.id)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", builder.id).into())
    }

    /// The user account of the coach assigned to `builder`.
    ///
    /// `None` when no coach is assigned or the assigned coach record is gone.
    pub async fn builder_coach(&self, builder: &Builder) -> AppResult<Option<User>> {
        let Some(coach_id) = builder.coach_id else {
            return Ok(None);
        };
        let Some(coach) = self.store.coachs.find_by_id(coach_id).await? else {
            tracing::debug!(builder_id = %builder.id, %coach_id, "Assigned coach no longer exists");
            return Ok(None);
        };
        self.coach_user(&coach).await.map(Some)
    }

    pub async fn builder_user(&self, builder: &Builder) -> AppResult<User> {
        self.user(builder.user_id).await
    }

    /// Users of every builder assigned to `coach`, in builder order.
    ///
    /// Two queries regardless of how many builders there are.
    pub async fn coach_builders(&self, coach: &Coach) -> AppResult<Vec<User>> {
        let builders = self.store.builders.list_for_coach(coach.id).await?;
        if builders.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<_> = builders.iter().map(|b| b.user_id).collect();
        let mut users = self.store.users.list(&UserFilter::by_ids(ids.clone())).await?;
        users.sort_by_key(|u| ids.iter().position(|id| *id == u.id));
        Ok(users)
    }

    pub async fn coach_user(&self, coach: &Coach) -> AppResult<User> {
        self.user(coach.user_id).await
    }

    pub async fn user_builder(&self, user: &User) -> AppResult<Option<Builder>> {
        Ok(self.store.builders.find_for_user(user.id).await?)
    }

    pub async fn user_coach(&self, user: &User) -> AppResult<Option<Coach>> {
        Ok(self.store.coachs.find_for_user(user.id).await?)
    }

    /// The profile matching `user.role`.
    pub async fn user_profile(&self, user: &User) -> AppResult<Profile> {
        Ok(match user.role {
            Role::Admin => Profile::Admin,
            Role::Builder => Profile::Builder(self.user_builder(user).await?),
            Role::Coach => Profile::Coach(self.user_coach(user).await?),
        })
    }
}
