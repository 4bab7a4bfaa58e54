//! Account creation and the admin bootstrap.

use std::sync::Arc;

use buildup_core::error::CoreError;
use buildup_core::roles::Role;
use buildup_core::types::{DbId, Timestamp};
use buildup_db::models::builder::CreateBuilder;
use buildup_db::models::coach::CreateCoach;
use buildup_db::models::project::CreateProject;
use buildup_db::models::user::{CreateUser, User};
use buildup_db::Store;
use serde::Deserialize;
use validator::Validate;

use super::{email_taken, hash_password, map_email_conflict};
use crate::auth::password::validate_password_strength;
use crate::auth::CredentialService;
use crate::error::{AppResult, WriteError};

/// Signup payload. Exactly one of `builder` and `coach` must be present.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[serde(default)]
    pub situation: String,
    #[serde(default)]
    pub description: String,
    pub birthdate: Option<Timestamp>,
    pub address: Option<String>,
    pub discord: Option<String>,
    pub linkedin: Option<String>,
    pub builder: Option<NewBuilder>,
    pub coach: Option<NewCoach>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBuilder {
    #[serde(default)]
    pub situation: String,
    #[serde(default)]
    pub description: String,
    pub coach_id: Option<DbId>,
    pub project: Option<NewProject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoach {
    #[serde(default)]
    pub situation: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: String,
    pub launch_date: Timestamp,
    #[serde(default)]
    pub is_lucrative: bool,
    #[serde(default)]
    pub is_officially_registered: bool,
}

impl NewProject {
    pub(crate) fn into_create(self, builder_id: DbId) -> CreateProject {
        CreateProject {
            builder_id,
            name: self.name,
            description: self.description,
            team: self.team,
            category: self.category,
            keywords: self.keywords,
            launch_date: self.launch_date,
            is_lucrative: self.is_lucrative,
            is_officially_registered: self.is_officially_registered,
        }
    }
}

/// The role profile requested at signup.
enum NewProfile {
    Builder(NewBuilder),
    Coach(NewCoach),
}

impl NewProfile {
    fn pick(builder: Option<NewBuilder>, coach: Option<NewCoach>) -> Result<Self, CoreError> {
        match (builder, coach) {
            (Some(builder), None) => Ok(Self::Builder(builder)),
            (None, Some(coach)) => Ok(Self::Coach(coach)),
            (None, None) => Err(CoreError::RoleViolation(
                "A user must be created with a builder or a coach profile".into(),
            )),
            (Some(_), Some(_)) => Err(CoreError::RoleViolation(
                "A user cannot be both a builder and a coach".into(),
            )),
        }
    }

    fn role(&self) -> Role {
        match self {
            Self::Builder(_) => Role::Builder,
            Self::Coach(_) => Role::Coach,
        }
    }
}

/// Create a user together with its builder or coach profile.
///
/// Steps run in order and stop at the first failure:
///
/// 1. exactly one role payload
/// 2. field validation and email availability
/// 3. password hashing
/// 4. user insert (role taken from the payload; never ADMIN)
/// 5. builder or coach insert
/// 6. project insert, when the builder payload embeds one
///
/// A failure in step 5 or 6 returns the user stored in step 4 alongside
/// the error. Nothing is rolled back.
pub async fn create_user(
    store: &Store,
    credentials: &Arc<CredentialService>,
    mut input: NewUser,
) -> Result<User, WriteError> {
    let profile = NewProfile::pick(input.builder.take(), input.coach.take())?;

    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    validate_password_strength(&input.password, credentials.password_config().min_length)
        .map_err(CoreError::Validation)?;

    if store.users.find_by_email(&input.email).await?.is_some() {
        tracing::debug!(email = %input.email, "Signup rejected, email taken");
        return Err(email_taken().into());
    }

    let password_hash = hash_password(credentials, input.password).await?;

    let user = store
        .users
        .create(&CreateUser {
            email: input.email,
            role: profile.role(),
            first_name: input.first_name,
            last_name: input.last_name,
            situation: input.situation,
            description: input.description,
            birthdate: input.birthdate,
            address: input.address,
            discord: input.discord,
            linkedin: input.linkedin,
            password_hash,
        })
        .await
        .map_err(map_email_conflict)?;

    attach_profile(store, &user, profile)
        .await
        .map_err(|e| WriteError::partial(user.clone(), e))?;

    tracing::info!(user_id = %user.id, role = %user.role, "Account created");
    Ok(user)
}

async fn attach_profile(store: &Store, user: &User, profile: NewProfile) -> AppResult<()> {
    match profile {
        NewProfile::Builder(new_builder) => {
            let builder = store
                .builders
                .create(&CreateBuilder {
                    user_id: user.id,
                    coach_id: new_builder.coach_id,
                    situation: new_builder.situation,
                    description: new_builder.description,
                })
                .await?;
            if let Some(project) = new_builder.project {
                store
                    .projects
                    .create(&project.into_create(builder.id))
                    .await?;
            }
        }
        NewProfile::Coach(new_coach) => {
            store
                .coachs
                .create(&CreateCoach {
                    user_id: user.id,
                    situation: new_coach.situation,
                    description: new_coach.description,
                })
                .await?;
        }
    }
    Ok(())
}

/// Make sure an ADMIN account exists for `email`.
///
/// Signup never assigns ADMIN; this start-up path is the only one that does.
/// An existing account with that email is returned unchanged.
pub async fn ensure_admin(
    store: &Store,
    credentials: &Arc<CredentialService>,
    email: &str,
    password: &str,
) -> AppResult<User> {
    if let Some(existing) = store.users.find_by_email(email).await? {
        if !existing.role.is_admin() {
            tracing::warn!(
                user_id = %existing.id,
                role = %existing.role,
                "Bootstrap email belongs to a non-admin account"
            );
        }
        return Ok(existing);
    }

    let password_hash = hash_password(credentials, password.to_string()).await?;
    let admin = store
        .users
        .create(&CreateUser {
            email: email.to_string(),
            role: Role::Admin,
            first_name: "Admin".into(),
            last_name: "BuildUp".into(),
            situation: String::new(),
            description: String::new(),
            birthdate: None,
            address: None,
            discord: None,
            linkedin: None,
            password_hash,
        })
        .await
        .map_err(map_email_conflict)?;

    tracing::info!(user_id = %admin.id, "Admin account created");
    Ok(admin)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use buildup_core::roles::{UserStatus, UserStep};
    use buildup_db::constraints::{UQ_BUILDERS_USER_ID, UQ_USERS_EMAIL};
    use buildup_db::memory::Collection;
    use buildup_db::models::user::UserFilter;
    use buildup_db::StoreError;

    use super::*;
    use crate::accounts::test_support::{
        credentials, memory_store, new_builder, new_coach, new_user,
    };
    use crate::error::AppError;
    use crate::role_graph::{Profile, RoleGraph};

    fn project(name: &str) -> NewProject {
        NewProject {
            name: name.into(),
            description: String::new(),
            team: String::new(),
            category: String::new(),
            keywords: String::new(),
            launch_date: chrono::Utc::now(),
            is_lucrative: false,
            is_officially_registered: false,
        }
    }

    #[tokio::test]
    async fn builder_signup_creates_user_and_builder() {
        let (store, _) = memory_store();
        let user = create_user(&store, &credentials(), new_builder("a@x.com"))
            .await
            .unwrap();

        assert_eq!(user.role, Role::Builder);
        assert_eq!(user.status, UserStatus::Candidating);
        assert_eq!(user.step, UserStep::Preselected);
        assert_ne!(user.password_hash, "password123");

        let graph = RoleGraph::new(&store);
        let builder = graph.user_builder(&user).await.unwrap().unwrap();
        assert!(graph.user_coach(&user).await.unwrap().is_none());

        let err = graph.builder_project(&builder).await.unwrap_err();
        assert!(err.is_not_found("Project"));
    }

    #[tokio::test]
    async fn coach_signup_creates_user_and_coach() {
        let (store, _) = memory_store();
        let user = create_user(&store, &credentials(), new_coach("c@x.com"))
            .await
            .unwrap();

        assert_eq!(user.role, Role::Coach);
        let graph = RoleGraph::new(&store);
        assert_matches!(graph.user_profile(&user).await.unwrap(), Profile::Coach(Some(_)));
        assert!(graph.user_builder(&user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn embedded_project_is_created() {
        let (store, _) = memory_store();
        let mut input = new_builder("p@x.com");
        input.builder.as_mut().unwrap().project = Some(project("Foo"));

        let user = create_user(&store, &credentials(), input).await.unwrap();

        let graph = RoleGraph::new(&store);
        let builder = graph.user_builder(&user).await.unwrap().unwrap();
        let project = graph.builder_project(&builder).await.unwrap();
        assert_eq!(project.name, "Foo");
        assert_eq!(project.keywords, "");
    }

    #[tokio::test]
    async fn role_payload_is_required() {
        let (store, _) = memory_store();
        let err = create_user(&store, &credentials(), new_user("n@x.com"))
            .await
            .unwrap_err();
        assert!(err.committed.is_none());
        assert_matches!(err.error, AppError::Core(CoreError::RoleViolation(_)));
        assert!(store.users.find_by_email("n@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn both_role_payloads_are_rejected() {
        let (store, _) = memory_store();
        let mut input = new_builder("both@x.com");
        input.coach = Some(NewCoach::default());

        let err = create_user(&store, &credentials(), input).await.unwrap_err();
        assert_matches!(err.error, AppError::Core(CoreError::RoleViolation(_)));
        assert!(store.users.find_by_email("both@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_regardless_of_role() {
        let (store, _) = memory_store();
        let creds = credentials();
        create_user(&store, &creds, new_builder("dup@x.com")).await.unwrap();

        let err = create_user(&store, &creds, new_coach("dup@x.com"))
            .await
            .unwrap_err();
        assert_matches!(err.error, AppError::Core(CoreError::Conflict(_)));

        let err = create_user(&store, &creds, new_builder("dup@x.com"))
            .await
            .unwrap_err();
        assert_matches!(err.error, AppError::Core(CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn invalid_fields_are_rejected_before_any_write() {
        let (store, _) = memory_store();
        let err = create_user(&store, &credentials(), new_builder("not-an-email"))
            .await
            .unwrap_err();
        assert_matches!(err.error, AppError::Core(CoreError::Validation(_)));

        let mut short = new_builder("short@x.com");
        short.password = "abc".into();
        let err = create_user(&store, &credentials(), short).await.unwrap_err();
        assert_matches!(err.error, AppError::Core(CoreError::Validation(_)));

        assert!(store.users.list(&Default::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_profile_insert_keeps_the_user() {
        let (store, memory) = memory_store();
        memory.set_writes_failing(Collection::Builders, true).await;

        let err = create_user(&store, &credentials(), new_builder("orphan@x.com"))
            .await
            .unwrap_err();

        let committed = err.committed.expect("user should be reported as committed");
        assert_eq!(committed.email, "orphan@x.com");
        assert_matches!(err.error, AppError::Store(_));

        let stored = store.users.find_by_email("orphan@x.com").await.unwrap();
        assert_eq!(stored.map(|u| u.id), Some(committed.id));
        assert!(store.builders.find_for_user(committed.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_project_insert_keeps_user_and_builder() {
        let (store, memory) = memory_store();
        memory.set_writes_failing(Collection::Projects, true).await;
        let mut input = new_builder("half@x.com");
        input.builder.as_mut().unwrap().project = Some(project("Foo"));

        let err = create_user(&store, &credentials(), input).await.unwrap_err();

        let committed = err.committed.unwrap();
        assert!(store.builders.find_for_user(committed.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn builder_created_with_coach_shows_up_under_that_coach() {
        let (store, _) = memory_store();
        let creds = credentials();
        let coach_user = create_user(&store, &creds, new_coach("b@x.com")).await.unwrap();
        let graph = RoleGraph::new(&store);
        let coach = graph.user_coach(&coach_user).await.unwrap().unwrap();

        let mut input = new_builder("a@x.com");
        input.builder.as_mut().unwrap().coach_id = Some(coach.id);
        let builder_user = create_user(&store, &creds, input).await.unwrap();

        let users = graph.coach_builders(&coach).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, builder_user.id);
    }

    #[tokio::test]
    async fn every_signup_has_exactly_one_profile() {
        let (store, _) = memory_store();
        let creds = credentials();
        for (i, builder) in [true, false, true, false].into_iter().enumerate() {
            let email = format!("user{i}@x.com");
            let input = if builder { new_builder(&email) } else { new_coach(&email) };
            create_user(&store, &creds, input).await.unwrap();
        }

        let graph = RoleGraph::new(&store);
        for user in store.users.list(&Default::default()).await.unwrap() {
            let has_builder = graph.user_builder(&user).await.unwrap().is_some();
            let has_coach = graph.user_coach(&user).await.unwrap().is_some();
            assert!(has_builder ^ has_coach, "user {} must have exactly one profile", user.email);
        }
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let (store, _) = memory_store();
        let creds = credentials();
        let first = ensure_admin(&store, &creds, "root@x.com", "rootpassword").await.unwrap();
        let second = ensure_admin(&store, &creds, "root@x.com", "other-password").await.unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(first.id, second.id);
        assert!(creds.verify("rootpassword", &second.password_hash));

        let graph = RoleGraph::new(&store);
        assert_matches!(graph.user_profile(&first).await.unwrap(), Profile::Admin);
    }

    #[test]
    fn email_constraint_violation_becomes_conflict() {
        let err = map_email_conflict(StoreError::UniqueViolation {
            constraint: UQ_USERS_EMAIL.into(),
        });
        assert_matches!(err, AppError::Core(CoreError::Conflict(_)));

        let err = map_email_conflict(StoreError::UniqueViolation {
            constraint: UQ_BUILDERS_USER_ID.into(),
        });
        assert_matches!(err, AppError::Store(_));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_signups_with_one_email_store_one_user() {
        let (store, _) = memory_store();
        let creds = credentials();

        let (first, second) = tokio::join!(
            create_user(&store, &creds, new_builder("race@x.com")),
            create_user(&store, &creds, new_builder("race@x.com")),
        );

        let (created, rejected): (Vec<_>, Vec<_>) =
            [first, second].into_iter().partition(Result::is_ok);
        assert_eq!(created.len(), 1);
        let err = rejected.into_iter().next().unwrap().unwrap_err();
        assert_matches!(err.error, AppError::Core(CoreError::Conflict(_)));
        assert!(err.committed.is_none());

        let filter = UserFilter {
            email: Some("race@x.com".into()),
            ..UserFilter::default()
        };
        assert_eq!(store.users.list(&filter).await.unwrap().len(), 1);
    }
}
