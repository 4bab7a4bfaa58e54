//! Caller-based access checks.
//!
//! Operations receive the caller explicitly as `Option<&User>` and call one
//! of these before touching the store. `None` means an anonymous request.

use buildup_core::error::CoreError;
use buildup_core::types::DbId;
use buildup_db::models::user::User;

/// Any authenticated caller. Rejects anonymous requests with 401.
pub fn require_caller(caller: Option<&User>) -> Result<&User, CoreError> {
    caller.ok_or_else(|| CoreError::Unauthorized("Authentication required".into()))
}

/// The caller must be `owner_id` itself or an admin. 401 when anonymous, 403 otherwise.
pub fn require_owner_or_admin(caller: Option<&User>, owner_id: DbId) -> Result<&User, CoreError> {
    let user = require_caller(caller)?;
    if user.id != owner_id && !user.role.is_admin() {
        return Err(CoreError::Forbidden("Access denied".into()));
    }
    Ok(user)
}

/// The caller must be an admin.
pub fn require_admin(caller: Option<&User>) -> Result<&User, CoreError> {
    let user = require_caller(caller)?;
    if !user.role.is_admin() {
        return Err(CoreError::Forbidden("Admin role required".into()));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use buildup_core::roles::{Role, UserStatus, UserStep};
    use buildup_core::types::new_id;

    use super::*;

    fn user(role: Role) -> User {
        User {
            id: new_id(),
            created_at: chrono::Utc::now(),
            email: format!("{}@buildup.test", role.as_str().to_lowercase()),
            role,
            status: UserStatus::default(),
            step: UserStep::default(),
            first_name: "Test".into(),
            last_name: "User".into(),
            situation: String::new(),
            description: String::new(),
            birthdate: None,
            address: None,
            discord: None,
            linkedin: None,
            password_hash: String::new(),
        }
    }

    #[test]
    fn anonymous_is_unauthorized_everywhere() {
        assert_matches!(require_caller(None), Err(CoreError::Unauthorized(_)));
        assert_matches!(
            require_owner_or_admin(None, new_id()),
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(require_admin(None), Err(CoreError::Unauthorized(_)));
    }

    #[test]
    fn owner_passes_stranger_is_forbidden() {
        let me = user(Role::Builder);
        assert!(require_owner_or_admin(Some(&me), me.id).is_ok());
        assert_matches!(
            require_owner_or_admin(Some(&me), new_id()),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn admin_passes_for_anyone() {
        let admin = user(Role::Admin);
        assert!(require_owner_or_admin(Some(&admin), new_id()).is_ok());
        assert!(require_admin(Some(&admin)).is_ok());
    }

    #[test]
    fn coach_is_not_admin() {
        let coach = user(Role::Coach);
        assert_matches!(require_admin(Some(&coach)), Err(CoreError::Forbidden(_)));
    }
}
