//! User entity model and DTOs.

use std::fmt;

use buildup_core::roles::{Role, UserStatus, UserStep};
use buildup_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub created_at: Timestamp,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[sqlx(try_from = "String")]
    pub status: UserStatus,
    #[sqlx(try_from = "String")]
    pub step: UserStep,
    pub first_name: String,
    pub last_name: String,
    pub situation: String,
    pub description: String,
    pub birthdate: Option<Timestamp>,
    pub address: Option<String>,
    pub discord: Option<String>,
    pub linkedin: Option<String>,
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("status", &self.status)
            .field("step", &self.step)
            .field("password_hash", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub created_at: Timestamp,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub step: UserStep,
    pub first_name: String,
    pub last_name: String,
    pub situation: String,
    pub description: String,
    pub birthdate: Option<Timestamp>,
    pub address: Option<String>,
    pub discord: Option<String>,
    pub linkedin: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            email: user.email.clone(),
            role: user.role,
            status: user.status,
            step: user.step,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            situation: user.situation.clone(),
            description: user.description.clone(),
            birthdate: user.birthdate,
            address: user.address.clone(),
            discord: user.discord.clone(),
            linkedin: user.linkedin.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// DTO for inserting a new user. Status and step take their defaults.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub situation: String,
    pub description: String,
    pub birthdate: Option<Timestamp>,
    pub address: Option<String>,
    pub discord: Option<String>,
    pub linkedin: Option<String>,
    pub password_hash: String,
}

/// Sparse change-set for a user. Only `Some` fields are applied.
///
/// `role` and the password hash cannot be changed this way.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    pub email: Option<String>,
    pub status: Option<UserStatus>,
    pub step: Option<UserStep>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub situation: Option<String>,
    pub description: Option<String>,
    pub birthdate: Option<Timestamp>,
    pub address: Option<String>,
    pub discord: Option<String>,
    pub linkedin: Option<String>,
}

impl UserChanges {
    /// Apply every present field to `user`, leaving the rest untouched.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(step) = self.step {
            user.step = step;
        }
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(situation) = &self.situation {
            user.situation = situation.clone();
        }
        if let Some(description) = &self.description {
            user.description = description.clone();
        }
        if let Some(birthdate) = self.birthdate {
            user.birthdate = Some(birthdate);
        }
        if let Some(address) = &self.address {
            user.address = Some(address.clone());
        }
        if let Some(discord) = &self.discord {
            user.discord = Some(discord.clone());
        }
        if let Some(linkedin) = &self.linkedin {
            user.linkedin = Some(linkedin.clone());
        }
    }
}

/// Predicate for [`UserRepository::list`](crate::repositories::UserRepository::list).
///
/// All present fields are AND-ed; an empty filter matches every user.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Set membership (`id IN (...)`).
    pub ids: Option<Vec<DbId>>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub step: Option<UserStep>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserFilter {
    pub fn by_email(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            ..Self::default()
        }
    }

    pub fn by_role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    pub fn by_ids(ids: Vec<DbId>) -> Self {
        Self {
            ids: Some(ids),
            ..Self::default()
        }
    }

    /// Evaluate the predicate in memory.
    pub fn matches(&self, user: &User) -> bool {
        self.ids.as_ref().map_or(true, |ids| ids.contains(&user.id))
            && self.email.as_ref().map_or(true, |e| *e == user.email)
            && self.role.map_or(true, |r| r == user.role)
            && self.status.map_or(true, |s| s == user.status)
            && self.step.map_or(true, |s| s == user.step)
            && self.first_name.as_ref().map_or(true, |n| *n == user.first_name)
            && self.last_name.as_ref().map_or(true, |n| *n == user.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: buildup_core::types::new_id(),
            created_at: chrono::Utc::now(),
            email: "ada@example.com".into(),
            role: Role::Builder,
            status: UserStatus::Candidating,
            step: UserStep::Preselected,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            situation: "Student".into(),
            description: String::new(),
            birthdate: None,
            address: None,
            discord: None,
            linkedin: None,
            password_hash: "$argon2id$secret".into(),
        }
    }

    #[test]
    fn changes_only_touch_present_fields() {
        let mut user = sample_user();
        let changes = UserChanges {
            first_name: Some("Augusta".into()),
            step: Some(UserStep::AdminMeeting),
            discord: Some("ada#0001".into()),
            ..UserChanges::default()
        };

        changes.apply_to(&mut user);

        assert_eq!(user.first_name, "Augusta");
        assert_eq!(user.step, UserStep::AdminMeeting);
        assert_eq!(user.discord.as_deref(), Some("ada#0001"));
        assert_eq!(user.last_name, "Lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, Role::Builder);
    }

    #[test]
    fn unknown_and_role_keys_are_ignored_when_deserializing() {
        let changes: UserChanges = serde_json::from_value(serde_json::json!({
            "lastName": "King",
            "role": "ADMIN",
            "favouriteColour": "green"
        }))
        .unwrap();
        let mut user = sample_user();
        changes.apply_to(&mut user);
        assert_eq!(user.last_name, "King");
        assert_eq!(user.role, Role::Builder);
    }

    #[test]
    fn debug_output_redacts_the_password_hash() {
        let rendered = format!("{:?}", sample_user());
        assert!(!rendered.contains("$argon2id$secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn filter_fields_are_anded() {
        let user = sample_user();
        assert!(UserFilter::default().matches(&user));
        assert!(UserFilter::by_role(Role::Builder).matches(&user));
        assert!(!UserFilter::by_role(Role::Coach).matches(&user));

        let filter = UserFilter {
            role: Some(Role::Builder),
            email: Some("other@example.com".into()),
            ..UserFilter::default()
        };
        assert!(!filter.matches(&user));
        assert!(UserFilter::by_ids(vec![user.id]).matches(&user));
        assert!(!UserFilter::by_ids(vec![]).matches(&user));
    }
}
