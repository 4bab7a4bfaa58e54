//! Query-string parsing for list endpoints.

use buildup_core::error::CoreError;
use buildup_db::models::user::UserFilter;

/// Build a [`UserFilter`] from `key=value` pairs; all pairs are AND-ed.
///
/// Accepted keys: `email`, `role`, `status`, `step`, `firstName`, `lastName`.
/// A repeated key keeps its last value.
pub fn user_filter(pairs: &[(String, String)]) -> Result<UserFilter, CoreError> {
    let mut filter = UserFilter::default();
    for (key, value) in pairs {
        match key.as_str() {
            "email" => filter.email = Some(value.clone()),
            "role" => filter.role = Some(value.parse()?),
            "status" => filter.status = Some(value.parse()?),
            "step" => filter.step = Some(value.parse()?),
            "firstName" => filter.first_name = Some(value.clone()),
            "lastName" => filter.last_name = Some(value.clone()),
            other => {
                return Err(CoreError::Validation(format!(
                    "Unknown user filter '{other}'"
                )))
            }
        }
    }
    Ok(filter)
}
