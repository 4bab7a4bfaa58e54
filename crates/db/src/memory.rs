//! In-memory implementation of every repository trait.
//!
//! Enforces the same unique constraints as the SQL schema (email, one builder
//! and one coach per user) but no foreign keys, so dangling references can be
//! set up directly. Rows come back in insertion order.

use std::collections::HashSet;

use async_trait::async_trait;
use buildup_core::roles::{UserStatus, UserStep};
use buildup_core::types::new_id;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::constraints::{UQ_BUILDERS_USER_ID, UQ_COACHS_USER_ID, UQ_USERS_EMAIL};
use crate::models::builder::{Builder, BuilderFilter, CreateBuilder};
use crate::models::coach::{Coach, CoachFilter, CreateCoach};
use crate::models::project::{CreateProject, Project, ProjectFilter};
use crate::models::user::{CreateUser, User, UserFilter};
use crate::repositories::{BuilderRepository, CoachRepository, ProjectRepository, UserRepository};
use crate::StoreError;

/// A table in the in-memory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Builders,
    Coachs,
    Projects,
}

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    builders: RwLock<Vec<Builder>>,
    coachs: RwLock<Vec<Coach>>,
    projects: RwLock<Vec<Project>>,
    failing_writes: RwLock<HashSet<Collection>>,
}

fn unique_violation(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert and replace on `collection` fail as if the store were
    /// unreachable, until switched back off.
    pub async fn set_writes_failing(&self, collection: Collection, failing: bool) {
        let mut failing_writes = self.failing_writes.write().await;
        if failing {
            failing_writes.insert(collection);
        } else {
            failing_writes.remove(&collection);
        }
    }

    async fn check_writable(&self, collection: Collection) -> Result<(), StoreError> {
        if self.failing_writes.read().await.contains(&collection) {
            tracing::debug!(?collection, "Rejecting write to failing collection");
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| filter.matches(u)).cloned().collect())
    }

    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        self.check_writable(Collection::Users).await?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == input.email) {
            return Err(unique_violation(UQ_USERS_EMAIL));
        }
        let user = User {
            id: new_id(),
            created_at: Utc::now(),
            email: input.email.clone(),
            role: input.role,
            status: UserStatus::default(),
            step: UserStep::default(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            situation: input.situation.clone(),
            description: input.description.clone(),
            birthdate: input.birthdate,
            address: input.address.clone(),
            discord: input.discord.clone(),
            linkedin: input.linkedin.clone(),
            password_hash: input.password_hash.clone(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<bool, StoreError> {
        self.check_writable(Collection::Users).await?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id != user.id && u.email == user.email) {
            return Err(unique_violation(UQ_USERS_EMAIL));
        }
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl BuilderRepository for MemoryStore {
    async fn list(&self, filter: &BuilderFilter) -> Result<Vec<Builder>, StoreError> {
        let builders = self.builders.read().await;
        Ok(builders.iter().filter(|b| filter.matches(b)).cloned().collect())
    }

    async fn create(&self, input: &CreateBuilder) -> Result<Builder, StoreError> {
        self.check_writable(Collection::Builders).await?;
        let mut builders = self.builders.write().await;
        if builders.iter().any(|b| b.user_id == input.user_id) {
            return Err(unique_violation(UQ_BUILDERS_USER_ID));
        }
        let builder = Builder {
            id: new_id(),
            user_id: input.user_id,
            coach_id: input.coach_id,
            candidating_date: Utc::now(),
            situation: input.situation.clone(),
            description: input.description.clone(),
        };
        builders.push(builder.clone());
        Ok(builder)
    }

    async fn update(&self, builder: &Builder) -> Result<bool, StoreError> {
        self.check_writable(Collection::Builders).await?;
        let mut builders = self.builders.write().await;
        if builders
            .iter()
            .any(|b| b.id != builder.id && b.user_id == builder.user_id)
        {
            return Err(unique_violation(UQ_BUILDERS_USER_ID));
        }
        match builders.iter_mut().find(|b| b.id == builder.id) {
            Some(slot) => {
                *slot = builder.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl CoachRepository for MemoryStore {
    async fn list(&self, filter: &CoachFilter) -> Result<Vec<Coach>, StoreError> {
        let coachs = self.coachs.read().await;
        Ok(coachs.iter().filter(|c| filter.matches(c)).cloned().collect())
    }

    async fn create(&self, input: &CreateCoach) -> Result<Coach, StoreError> {
        self.check_writable(Collection::Coachs).await?;
        let mut coachs = self.coachs.write().await;
        if coachs.iter().any(|c| c.user_id == input.user_id) {
            return Err(unique_violation(UQ_COACHS_USER_ID));
        }
        let coach = Coach {
            id: new_id(),
            user_id: input.user_id,
            candidating_date: Utc::now(),
            situation: input.situation.clone(),
            description: input.description.clone(),
        };
        coachs.push(coach.clone());
        Ok(coach)
    }

    async fn update(&self, coach: &Coach) -> Result<bool, StoreError> {
        self.check_writable(Collection::Coachs).await?;
        let mut coachs = self.coachs.write().await;
        if coachs
            .iter()
            .any(|c| c.id != coach.id && c.user_id == coach.user_id)
        {
            return Err(unique_violation(UQ_COACHS_USER_ID));
        }
        match coachs.iter_mut().find(|c| c.id == coach.id) {
            Some(slot) => {
                *slot = coach.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        let projects = self.projects.read().await;
        Ok(projects.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn create(&self, input: &CreateProject) -> Result<Project, StoreError> {
        self.check_writable(Collection::Projects).await?;
        let project = Project {
            id: new_id(),
            builder_id: input.builder_id,
            name: input.name.clone(),
            description: input.description.clone(),
            team: input.team.clone(),
            category: input.category.clone(),
            keywords: input.keywords.clone(),
            launch_date: input.launch_date,
            is_lucrative: input.is_lucrative,
            is_officially_registered: input.is_officially_registered,
        };
        self.projects.write().await.push(project.clone());
        Ok(project)
    }

    async fn update(&self, project: &Project) -> Result<bool, StoreError> {
        self.check_writable(Collection::Projects).await?;
        let mut projects = self.projects.write().await;
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => {
                *slot = project.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
